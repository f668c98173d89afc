//! Queued rewrite operations.
//!
//!     An operation is an instruction anchored at a token index. Nothing happens when it is
//!     queued; the renderer executes it when its anchor is reached. Executing appends the
//!     operation's text (if any) to the output and tells the renderer at which token index to
//!     resume.
//!
//!     Deletion is not a separate variant: a `Replace` without text behaves exactly like one.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOperation {
    /// Emit `text` right before the token at `index`. The token itself is still rendered.
    InsertBefore { index: usize, text: String },

    /// Emit `text` (if any) in place of tokens `index..=last_index`.
    Replace {
        index: usize,
        last_index: usize,
        text: Option<String>,
    },
}

impl RewriteOperation {
    pub fn insert_before(index: usize, text: impl Into<String>) -> Self {
        RewriteOperation::InsertBefore {
            index,
            text: text.into(),
        }
    }

    pub fn replace(index: usize, last_index: usize, text: impl Into<String>) -> Self {
        RewriteOperation::Replace {
            index,
            last_index,
            text: Some(text.into()),
        }
    }

    pub fn delete(index: usize, last_index: usize) -> Self {
        RewriteOperation::Replace {
            index,
            last_index,
            text: None,
        }
    }

    /// Anchor token index
    pub fn index(&self) -> usize {
        match self {
            RewriteOperation::InsertBefore { index, .. } | RewriteOperation::Replace { index, .. } => {
                *index
            }
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            RewriteOperation::InsertBefore { text, .. } => Some(text),
            RewriteOperation::Replace { text, .. } => text.as_deref(),
        }
    }

    /// True for replacements and deletions.
    pub fn is_replace(&self) -> bool {
        matches!(self, RewriteOperation::Replace { .. })
    }

    /// Append this operation's text to `out` and return the index of the next token to render.
    pub fn execute(&self, out: &mut String) -> usize {
        match self {
            RewriteOperation::InsertBefore { index, text } => {
                out.push_str(text);
                *index
            }
            RewriteOperation::Replace {
                last_index, text, ..
            } => {
                if let Some(text) = text {
                    out.push_str(text);
                }
                last_index.saturating_add(1)
            }
        }
    }
}

impl fmt::Display for RewriteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteOperation::InsertBefore { index, text } => {
                write!(f, "InsertBefore@{}{:?}", index, text)
            }
            RewriteOperation::Replace {
                index,
                last_index,
                text: Some(text),
            } if index == last_index => write!(f, "Replace@{}{:?}", index, text),
            RewriteOperation::Replace {
                index,
                last_index,
                text: Some(text),
            } => write!(f, "Replace@{}..{}{:?}", index, last_index, text),
            RewriteOperation::Replace {
                index,
                last_index,
                text: None,
            } if index == last_index => write!(f, "Delete@{}", index),
            RewriteOperation::Replace {
                index,
                last_index,
                text: None,
            } => write!(f, "Delete@{}..{}", index, last_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_before_resumes_at_anchor() {
        let mut out = String::from("a");
        let next = RewriteOperation::insert_before(4, "(").execute(&mut out);
        assert_eq!(out, "a(");
        assert_eq!(next, 4);
    }

    #[test]
    fn test_replace_skips_through_last_index() {
        let mut out = String::new();
        let next = RewriteOperation::replace(2, 5, "x").execute(&mut out);
        assert_eq!(out, "x");
        assert_eq!(next, 6);
    }

    #[test]
    fn test_delete_emits_nothing() {
        let mut out = String::from("keep");
        let next = RewriteOperation::delete(3, 3).execute(&mut out);
        assert_eq!(out, "keep");
        assert_eq!(next, 4);
        assert!(RewriteOperation::delete(3, 3).is_replace());
        assert_eq!(RewriteOperation::delete(3, 3).text(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RewriteOperation::insert_before(3, "a\"b").to_string(),
            r#"InsertBefore@3"a\"b""#
        );
        assert_eq!(RewriteOperation::replace(1, 1, "x").to_string(), r#"Replace@1"x""#);
        assert_eq!(RewriteOperation::replace(1, 2, "x").to_string(), r#"Replace@1..2"x""#);
        assert_eq!(RewriteOperation::delete(7, 7).to_string(), "Delete@7");
    }
}
