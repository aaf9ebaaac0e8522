use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading examples and building features.
#[derive(Debug, Error)]
pub enum StacknerError {
    /// A required input file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// The path that was resolved.
        path: PathBuf,
    },

    /// A line of a token/label file could not be parsed.
    #[error("malformed line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number in the input.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Words and label tuples of a sentence have different lengths.
    #[error("sentence {guid:?} has {words} words but {labels} label tuples")]
    MismatchedLabels {
        guid: String,
        words: usize,
        labels: usize,
    },

    /// A label string is not part of the label vocabulary.
    #[error("unknown label {0:?}")]
    UnknownLabel(String),

    /// The same label appears twice in a label list.
    #[error("duplicate label {0:?}")]
    DuplicateLabel(String),

    /// The word vocabulary lacks one of its reserved entries.
    #[error("word vocabulary is missing reserved entry {0:?}")]
    MissingReservedWord(&'static str),

    /// A sub-word token has no id and the tokenizer has no unknown token.
    #[error("token {0:?} is not in the tokenizer vocabulary")]
    UnknownToken(String),

    /// The tokenizer failed to load or encode.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// The feature configuration cannot produce valid records.
    #[error("invalid feature config: {0}")]
    InvalidConfig(String),

    /// A produced array does not have the configured length.
    #[error("{field} has length {actual}, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for stackner operations.
pub type Result<T> = std::result::Result<T, StacknerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = StacknerError::NotFound {
            path: PathBuf::from("data/train.txt"),
        };
        assert_eq!(err.to_string(), "file not found: data/train.txt");

        let err = StacknerError::LengthMismatch {
            field: "freq_ids",
            expected: 8,
            actual: 7,
        };
        assert_eq!(err.to_string(), "freq_ids has length 7, expected 8");

        let err = StacknerError::UnknownLabel("B-Foo".into());
        assert!(err.to_string().contains("B-Foo"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StacknerError>();
    }
}
