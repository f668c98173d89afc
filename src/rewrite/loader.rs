//! Source and script loading
//!
//! `DocumentLoader` reads source text from a file or string and hands out its tokens or a
//! rewrite stream over them. `load_script` reads a rewrite script from disk. Both are used by
//! the CLI and by tests.
//!
//! # Example
//!
//! ```rust
//! use token_rewrite::rewrite::loader::{load_script, DocumentLoader};
//!
//! let script = load_script("edits.yaml", None).unwrap();
//! let stream = DocumentLoader::from_path("main.c").unwrap().apply(&script).unwrap();
//! println!("{}", stream.render());
//! ```

use crate::rewrite::script::{RewriteScript, ScriptError, ScriptFormat};
use crate::rewrite::stream::TokenRewriteStream;
use crate::rewrite::token::TokenBuffer;
use std::fs;
use std::path::Path;

/// Error that can occur when loading sources or scripts
#[derive(Debug, Clone)]
pub enum LoaderError {
    /// IO error when reading a file
    IoError(String),
    /// Script parsing or application error
    ScriptError(ScriptError),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
            LoaderError::ScriptError(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

impl From<ScriptError> for LoaderError {
    fn from(err: ScriptError) -> Self {
        LoaderError::ScriptError(err)
    }
}

/// Source text with tokenization and rewrite shortcuts
pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(DocumentLoader { source })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> TokenBuffer {
        TokenBuffer::from_source(&self.source)
    }

    /// A rewrite stream over the tokens, with nothing queued yet.
    pub fn rewrite(&self) -> TokenRewriteStream<TokenBuffer> {
        TokenRewriteStream::new(self.tokens())
    }

    /// A rewrite stream with `script` already queued.
    pub fn apply(
        &self,
        script: &RewriteScript,
    ) -> Result<TokenRewriteStream<TokenBuffer>, LoaderError> {
        let mut stream = self.rewrite();
        script.apply(&mut stream)?;
        Ok(stream)
    }
}

/// Read a script, taking the format from the file extension unless one is given.
pub fn load_script<P: AsRef<Path>>(
    path: P,
    format: Option<ScriptFormat>,
) -> Result<RewriteScript, LoaderError> {
    let path = path.as_ref();
    let format = match format {
        Some(format) => format,
        None => ScriptFormat::from_path(path)?,
    };
    let text = fs::read_to_string(path)?;
    Ok(RewriteScript::parse(&text, format)?)
}
