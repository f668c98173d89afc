//! Main module for token rewriting functionality

pub mod config;
pub mod lexing;
pub mod loader;
pub mod logging;
pub mod operation;
pub mod program;
pub mod script;
pub mod stream;
pub mod token;

pub use lexing::tokenize;
pub use operation::RewriteOperation;
pub use program::{Program, ProgramStore, DEFAULT_PROGRAM_NAME};
pub use script::{RewriteScript, ScriptError, ScriptFormat, ScriptOperation};
pub use stream::TokenRewriteStream;
pub use token::{Token, TokenBuffer, TokenKind, TokenPosition, TokenSource};
