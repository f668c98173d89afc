//! Rewrite scripts
//!
//!     A script is a list of operations to queue on a [TokenRewriteStream], written in YAML or
//!     JSON. Each entry names its operation with `op` and may target a `program`; entries
//!     without one go to the default program.
//!
//!     ```yaml
//!     operations:
//!       - op: insert_after
//!         index: 0
//!         text: "("
//!       - op: replace
//!         from: 2
//!         to: 4
//!         text: "Z"
//!         program: header
//!       - op: replace_matching
//!         pattern: "^old_(\\w+)$"
//!         text: "new_$1"
//!       - op: rollback
//!         to: 2
//!     ```
//!
//!     `replace_matching` rewrites every token whose text matches `pattern`, substituting
//!     matches with `text` (capture groups allowed), and queues it as a single-token replace.

use crate::rewrite::program::DEFAULT_PROGRAM_NAME;
use crate::rewrite::stream::TokenRewriteStream;
use crate::rewrite::token::TokenSource;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Errors that can occur while reading or applying a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// The script text could not be deserialized
    Parse(String),
    /// A `replace_matching` pattern is not a valid regex
    InvalidPattern { pattern: String, message: String },
    /// Unrecognized script format name or file extension
    UnknownFormat(String),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Parse(msg) => write!(f, "Script parse error: {}", msg),
            ScriptError::InvalidPattern { pattern, message } => {
                write!(f, "Invalid pattern '{}': {}", pattern, message)
            }
            ScriptError::UnknownFormat(name) => write!(f, "Unknown script format: {}", name),
        }
    }
}

impl std::error::Error for ScriptError {}

impl From<serde_yaml::Error> for ScriptError {
    fn from(err: serde_yaml::Error) -> Self {
        ScriptError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(err: serde_json::Error) -> Self {
        ScriptError::Parse(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFormat {
    Yaml,
    Json,
}

impl ScriptFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => ext.parse(),
            None => Err(ScriptError::UnknownFormat(path.display().to_string())),
        }
    }
}

impl FromStr for ScriptFormat {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(ScriptFormat::Yaml),
            "json" => Ok(ScriptFormat::Json),
            _ => Err(ScriptError::UnknownFormat(s.to_string())),
        }
    }
}

/// One queued edit as written in a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptOperation {
    InsertBefore {
        #[serde(default)]
        program: Option<String>,
        index: usize,
        text: String,
    },
    InsertAfter {
        #[serde(default)]
        program: Option<String>,
        index: usize,
        text: String,
    },
    /// `to` defaults to `from`
    Replace {
        #[serde(default)]
        program: Option<String>,
        from: usize,
        #[serde(default)]
        to: Option<usize>,
        text: String,
    },
    Delete {
        #[serde(default)]
        program: Option<String>,
        from: usize,
        #[serde(default)]
        to: Option<usize>,
    },
    ReplaceMatching {
        #[serde(default)]
        program: Option<String>,
        pattern: String,
        text: String,
    },
    Rollback {
        #[serde(default)]
        program: Option<String>,
        to: usize,
    },
    DeleteProgram {
        #[serde(default)]
        program: Option<String>,
    },
}

impl ScriptOperation {
    /// Target program, falling back to the default one.
    pub fn program(&self) -> &str {
        let program = match self {
            ScriptOperation::InsertBefore { program, .. }
            | ScriptOperation::InsertAfter { program, .. }
            | ScriptOperation::Replace { program, .. }
            | ScriptOperation::Delete { program, .. }
            | ScriptOperation::ReplaceMatching { program, .. }
            | ScriptOperation::Rollback { program, .. }
            | ScriptOperation::DeleteProgram { program } => program,
        };
        program.as_deref().unwrap_or(DEFAULT_PROGRAM_NAME)
    }

    /// Queue this operation on `stream`.
    pub fn apply<S: TokenSource>(
        &self,
        stream: &mut TokenRewriteStream<S>,
    ) -> Result<(), ScriptError> {
        let program = self.program();
        match self {
            ScriptOperation::InsertBefore { index, text, .. } => {
                stream.insert_before_in(program, *index, text.as_str())
            }
            ScriptOperation::InsertAfter { index, text, .. } => {
                stream.insert_after_in(program, *index, text.as_str())
            }
            ScriptOperation::Replace { from, to, text, .. } => {
                stream.replace_in(program, *from, to.unwrap_or(*from), text.as_str())
            }
            ScriptOperation::Delete { from, to, .. } => {
                stream.delete_in(program, *from, to.unwrap_or(*from))
            }
            ScriptOperation::ReplaceMatching { pattern, text, .. } => {
                let regex = Regex::new(pattern).map_err(|e| ScriptError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
                let source = stream.source();
                let replacements: Vec<(usize, String)> = (0..source.token_count())
                    .filter_map(|index| {
                        let token = source.token_text(index)?;
                        regex
                            .is_match(token)
                            .then(|| (index, regex.replace_all(token, text.as_str()).into_owned()))
                    })
                    .collect();
                tracing::debug!(pattern = %pattern, matches = replacements.len(), "replace matching");
                for (index, replacement) in replacements {
                    stream.replace_in(program, index, index, replacement);
                }
            }
            ScriptOperation::Rollback { to, .. } => stream.rollback_in(program, *to),
            ScriptOperation::DeleteProgram { .. } => stream.delete_program_in(program),
        }
        Ok(())
    }
}

/// An ordered list of script operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteScript {
    #[serde(default)]
    pub operations: Vec<ScriptOperation>,
}

impl RewriteScript {
    pub fn new(operations: Vec<ScriptOperation>) -> Self {
        RewriteScript { operations }
    }

    pub fn parse(text: &str, format: ScriptFormat) -> Result<Self, ScriptError> {
        match format {
            ScriptFormat::Yaml => Self::from_yaml(text),
            ScriptFormat::Json => Self::from_json(text),
        }
    }

    pub fn from_yaml(text: &str) -> Result<Self, ScriptError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Queue every operation on `stream`, in order. Stops at the first invalid operation,
    /// leaving the ones before it queued.
    pub fn apply<S: TokenSource>(
        &self,
        stream: &mut TokenRewriteStream<S>,
    ) -> Result<usize, ScriptError> {
        for operation in &self.operations {
            operation.apply(stream)?;
        }
        Ok(self.operations.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> TokenRewriteStream<Vec<&'static str>> {
        TokenRewriteStream::new(vec!["let", " ", "old_name", " ", "=", " ", "1"])
    }

    #[test]
    fn test_parse_yaml() {
        let script = RewriteScript::from_yaml(
            r#"
operations:
  - op: insert_before
    index: 0
    text: "pub "
  - op: delete
    from: 1
  - op: replace
    from: 2
    to: 4
    text: X
    program: other
"#,
        )
        .unwrap();

        assert_eq!(
            script.operations,
            vec![
                ScriptOperation::InsertBefore {
                    program: None,
                    index: 0,
                    text: "pub ".to_string(),
                },
                ScriptOperation::Delete {
                    program: None,
                    from: 1,
                    to: None,
                },
                ScriptOperation::Replace {
                    program: Some("other".to_string()),
                    from: 2,
                    to: Some(4),
                    text: "X".to_string(),
                },
            ]
        );
        assert_eq!(script.operations[2].program(), "other");
        assert_eq!(script.operations[1].program(), DEFAULT_PROGRAM_NAME);
    }

    #[test]
    fn test_parse_json() {
        let script = RewriteScript::from_json(
            r#"{"operations": [{"op": "insert_after", "index": 6, "text": ";"},
                               {"op": "delete_program", "program": "p"}]}"#,
        )
        .unwrap();
        assert_eq!(script.len(), 2);
        assert_eq!(
            script.operations[1],
            ScriptOperation::DeleteProgram {
                program: Some("p".to_string())
            }
        );
    }

    #[test]
    fn test_unknown_operation_is_parse_error() {
        let err = RewriteScript::from_yaml("operations:\n  - op: explode\n").unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn test_empty_script() {
        let script = RewriteScript::from_json("{}").unwrap();
        assert!(script.is_empty());
    }

    #[test]
    fn test_apply_queues_in_order() {
        let script = RewriteScript::new(vec![
            ScriptOperation::InsertAfter {
                program: None,
                index: 6,
                text: ";".to_string(),
            },
            ScriptOperation::Replace {
                program: None,
                from: 4,
                to: None,
                text: ":=".to_string(),
            },
            ScriptOperation::Delete {
                program: None,
                from: 0,
                to: Some(1),
            },
        ]);
        let mut stream = stream();
        assert_eq!(script.apply(&mut stream), Ok(3));
        assert_eq!(stream.render(), "old_name := 1;");
    }

    #[test]
    fn test_replace_matching_uses_captures() {
        let mut stream = stream();
        ScriptOperation::ReplaceMatching {
            program: Some("renames".to_string()),
            pattern: r"^old_(\w+)$".to_string(),
            text: "new_$1".to_string(),
        }
        .apply(&mut stream)
        .unwrap();

        assert_eq!(stream.render_program("renames"), "let new_name = 1");
        assert_eq!(stream.render(), "let old_name = 1");
    }

    #[test]
    fn test_invalid_pattern() {
        let mut stream = stream();
        let err = ScriptOperation::ReplaceMatching {
            program: None,
            pattern: "(".to_string(),
            text: String::new(),
        }
        .apply(&mut stream)
        .unwrap_err();
        assert!(matches!(err, ScriptError::InvalidPattern { .. }));
    }

    #[test]
    fn test_rollback_operation() {
        let script = RewriteScript::from_yaml(
            r#"
operations:
  - { op: insert_before, index: 0, text: "a" }
  - { op: insert_before, index: 0, text: "b" }
  - { op: rollback, to: 1 }
"#,
        )
        .unwrap();
        let mut stream = stream();
        script.apply(&mut stream).unwrap();
        assert_eq!(stream.render(), "alet old_name = 1");
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ScriptFormat::from_path("edits.yml"), Ok(ScriptFormat::Yaml));
        assert_eq!(ScriptFormat::from_path("edits.JSON"), Ok(ScriptFormat::Json));
        assert!(matches!(
            ScriptFormat::from_path("edits.txt"),
            Err(ScriptError::UnknownFormat(_))
        ));
        assert!(ScriptFormat::from_path("edits").is_err());
    }
}
