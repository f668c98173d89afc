//! Owned, index-stable token storage.

use super::{Token, TokenSource};
use crate::rewrite::lexing::tokenize;

/// The tokens of one source text, in order. Token `i` always lives at position `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
}

impl TokenBuffer {
    /// Wrap already produced tokens. Their `index` fields must match their positions.
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(tokens.iter().enumerate().all(|(i, t)| t.index == i));
        TokenBuffer { tokens }
    }

    /// Tokenize `source` with the base lexer.
    pub fn from_source(source: &str) -> Self {
        TokenBuffer {
            tokens: tokenize(source),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Every token in its debug form, see [Token]'s `Display`.
    pub fn to_debug_string(&self) -> String {
        match self.tokens.len() {
            0 => String::new(),
            len => self.to_debug_string_range(0, len - 1),
        }
    }

    /// Debug form of the tokens in `start..=end`, clamped to the buffer.
    pub fn to_debug_string_range(&self, start: usize, end: usize) -> String {
        if start > end {
            return String::new();
        }
        self.tokens
            .iter()
            .skip(start)
            .take(end.saturating_sub(start).saturating_add(1))
            .map(ToString::to_string)
            .collect()
    }
}

impl TokenSource for TokenBuffer {
    fn token_count(&self) -> usize {
        self.tokens.len()
    }

    fn token_text(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|token| token.text.as_str())
    }
}

impl<'a> IntoIterator for &'a TokenBuffer {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl From<Vec<Token>> for TokenBuffer {
    fn from(tokens: Vec<Token>) -> Self {
        TokenBuffer::new(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_source_indexes_tokens_in_order() {
        let buffer = TokenBuffer::from_source("x = 1;");
        assert_eq!(buffer.len(), 6);
        for (position, token) in buffer.iter().enumerate() {
            assert_eq!(token.index, position);
        }
        assert_eq!(buffer.token_text(4), Some("1"));
    }

    #[test]
    fn test_debug_string() {
        let buffer = TokenBuffer::from_source("ab 12");
        insta::assert_snapshot!(
            buffer.to_debug_string(),
            @"[@0,0:1='ab',<Identifier>][@1,2:2=' ',<Whitespace>][@2,3:4='12',<Number>]"
        );
    }

    #[test]
    fn test_debug_string_range_is_inclusive_and_clamped() {
        let buffer = TokenBuffer::from_source("ab 12");
        assert_eq!(
            buffer.to_debug_string_range(1, 1),
            "[@1,2:2=' ',<Whitespace>]"
        );
        assert_eq!(buffer.to_debug_string_range(2, 40), "[@2,3:4='12',<Number>]");
        assert_eq!(buffer.to_debug_string_range(5, 9), "");
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = TokenBuffer::from_source("");
        assert!(buffer.is_empty());
        assert_eq!(buffer.to_debug_string(), "");
    }
}
