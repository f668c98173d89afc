//! # token-rewrite
//!
//! Lazy, non-destructive rewriting of lexer token streams.
//!
//! File Layout
//!
//!     src/rewrite
//!       ├── token        Token model and the `TokenSource` boundary the engine reads
//!       ├── lexing       logos base tokenization into a `TokenBuffer`
//!       ├── operation    Queued edit variants
//!       ├── program      Named, sorted edit programs and the program store
//!       ├── stream       `TokenRewriteStream`: queuing, rollback and rendering
//!       ├── script       YAML / JSON rewrite scripts
//!       ├── loader       Source loading shortcuts
//!       ├── config       Layered configuration
//!       └── logging      tracing subscriber setup
//!
//! The engine never touches the token buffer. Edits are queued per program and only merged
//! with the tokens when a rendering is requested, so token indices stay stable and a program
//! can be rolled back by dropping queued operations.

pub mod rewrite;
