//! Token types and the boundary the rewrite engine reads through.
//!
//!     Tokens are produced once by the lexer and never change afterwards. Each one carries a
//!     stable zero-based index, which is what rewrite operations are anchored to. The engine
//!     itself only needs two things from a token sequence: how many tokens there are and the
//!     text of the token at a given index. That is the [TokenSource] trait, so anything from a
//!     full [TokenBuffer] to a plain `Vec<&str>` can be rewritten.
//!
//!     Positions handed to the engine can be raw indices or token handles, see [TokenPosition].

pub mod buffer;

pub use buffer::TokenBuffer;

use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Lexical categories produced by the base tokenizer.
///
/// Every character of the input falls into one of these kinds, so concatenating the text of
/// all tokens always gives back the source.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    #[regex(r"[ \t\r\f]+")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    String,

    #[regex(r"//[^\n]*")]
    Comment,

    /// Any other single character, including non-ASCII ones
    #[regex(r"[^ \t\r\f\nA-Za-z0-9_]")]
    Punctuation,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single token with its stable index and source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub index: usize,
    pub kind: TokenKind,
    pub text: String,
    /// Byte range in the source text
    pub span: Range<usize>,
}

impl Token {
    pub fn new(index: usize, kind: TokenKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Token {
            index,
            kind,
            text: text.into(),
            span,
        }
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Debug form: `[@index,start:stop='text',<Kind>]`, with `stop` inclusive.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .text
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t");
        write!(
            f,
            "[@{},{}:{}='{}',<{}>]",
            self.index,
            self.span.start,
            self.span.end.saturating_sub(1),
            text,
            self.kind
        )
    }
}

/// Read-only view over an ordered, index-addressable token sequence.
pub trait TokenSource {
    /// Number of tokens in the sequence
    fn token_count(&self) -> usize;

    /// Text of the token at `index`, or `None` past the end
    fn token_text(&self, index: usize) -> Option<&str>;
}

impl<T: AsRef<str>> TokenSource for [T] {
    fn token_count(&self) -> usize {
        self.len()
    }

    fn token_text(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<T: AsRef<str>> TokenSource for Vec<T> {
    fn token_count(&self) -> usize {
        self.len()
    }

    fn token_text(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<S: TokenSource + ?Sized> TokenSource for &S {
    fn token_count(&self) -> usize {
        (**self).token_count()
    }

    fn token_text(&self, index: usize) -> Option<&str> {
        (**self).token_text(index)
    }
}

/// Anything that resolves to a token index: a raw index or a token handle.
pub trait TokenPosition {
    fn token_index(&self) -> usize;
}

impl TokenPosition for usize {
    fn token_index(&self) -> usize {
        *self
    }
}

impl TokenPosition for Token {
    fn token_index(&self) -> usize {
        self.index
    }
}

impl<P: TokenPosition + ?Sized> TokenPosition for &P {
    fn token_index(&self) -> usize {
        (**self).token_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_strings_are_a_token_source() {
        let tokens = vec!["abc", "34"];
        assert_eq!(tokens.token_count(), 2);
        assert_eq!(tokens.token_text(1), Some("34"));
        assert_eq!(tokens.token_text(2), None);
    }

    #[test]
    fn test_token_and_index_resolve_to_same_position() {
        let token = Token::new(3, TokenKind::Identifier, "x", 7..8);
        assert_eq!(token.token_index(), 3usize.token_index());
        assert_eq!((&token).token_index(), 3);
    }

    #[test]
    fn test_token_display_escapes_newlines() {
        let token = Token::new(1, TokenKind::Newline, "\n", 3..4);
        assert_eq!(token.to_string(), "[@1,3:3='\\n',<Newline>]");
    }
}
