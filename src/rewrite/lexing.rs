//! Base tokenization
//!
//!     This module provides the raw tokenization using the logos lexer library. This is where
//!     source strings become index-stable token sequences that rewrite programs can anchor to.
//!
//!     The grammar is deliberately lossless: whitespace, newlines and comments are tokens like
//!     any other, so the original rendering of a buffer is byte-for-byte the source text.

use crate::rewrite::token::{Token, TokenKind};
use logos::Logos;

/// Tokenize source text, assigning each token its position as index.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        // Keep the slice of a failed match so the output stays lossless
        let kind = result.unwrap_or(TokenKind::Punctuation);
        tokens.push(Token::new(tokens.len(), kind, lexer.slice(), lexer.span()));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenizes() {
        let tokens = tokenize("hello world");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[2].span, 6..11);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize(""), vec![]);
    }

    #[test]
    fn test_statement() {
        assert_eq!(
            kinds("let x = f(34); // done\n"),
            vec![
                TokenKind::Identifier,
                TokenKind::Whitespace,
                TokenKind::Identifier,
                TokenKind::Whitespace,
                TokenKind::Punctuation,
                TokenKind::Whitespace,
                TokenKind::Identifier,
                TokenKind::Punctuation,
                TokenKind::Number,
                TokenKind::Punctuation,
                TokenKind::Punctuation,
                TokenKind::Whitespace,
                TokenKind::Comment,
                TokenKind::Newline,
            ]
        );
    }

    #[test]
    fn test_string_literals() {
        let tokens = tokenize(r#"say("hi \"there\"")"#);
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].text, r#""hi \"there\"""#);
    }

    #[test]
    fn test_unterminated_string_is_lossless() {
        let source = "x = \"abc\ny";
        let text: String = tokenize(source).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(text, source);
    }

    #[test]
    fn test_non_ascii_is_preserved() {
        let source = "é → x";
        let text: String = tokenize(source).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(text, source);
    }

    #[test]
    fn test_indices_match_positions() {
        for (position, token) in tokenize("a+b\n  c").iter().enumerate() {
            assert_eq!(token.index, position);
        }
    }
}
