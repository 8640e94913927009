//! Error types for fix computation and application

use std::path::PathBuf;

use rowan::TextRange;
use thiserror::Error;

/// Main error type for kempt operations
#[derive(Debug, Error)]
pub enum KemptError {
    /// A violation span could not be mapped to an anchor in the tree
    #[error("Cannot resolve span {span:?} in a document of length {len}")]
    Resolution { span: TextRange, len: u32 },

    /// Two edits of one batch overlap; the batch is rejected as a whole
    #[error("Conflicting edits for rule '{rule_id}': {first:?} overlaps {second:?}")]
    ConflictingEdits {
        rule_id: String,
        first: TextRange,
        second: TextRange,
    },

    /// A fix-all batch holds violations of more than one rule
    #[error("Fix-all batch for rule '{expected}' contains a violation of rule '{found}'")]
    MixedRules { expected: String, found: String },

    /// A committed edit produced text that no longer parses as well as before
    #[error("Reparse failure after applying '{rule_id}': {message}")]
    Reparse { rule_id: String, message: String },

    /// An edit does not fit the document it is applied to
    #[error("Invalid edit: {message}")]
    InvalidEdit { message: String },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Resolution,
    ConflictingEdits,
    MixedRules,
    Reparse,
    InvalidEdit,
    Config,
    Io,
    Internal,
}

impl KemptError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            KemptError::Resolution { .. } => ErrorKind::Resolution,
            KemptError::ConflictingEdits { .. } => ErrorKind::ConflictingEdits,
            KemptError::MixedRules { .. } => ErrorKind::MixedRules,
            KemptError::Reparse { .. } => ErrorKind::Reparse,
            KemptError::InvalidEdit { .. } => ErrorKind::InvalidEdit,
            KemptError::Config { .. } => ErrorKind::Config,
            KemptError::Io { .. } => ErrorKind::Io,
            KemptError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Rejects a whole fix-all batch instead of a single violation
    pub fn is_batch_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ConflictingEdits | ErrorKind::MixedRules | ErrorKind::Reparse
        )
    }

    /// Check if processing can continue with the next violation
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Resolution | ErrorKind::InvalidEdit)
    }

    pub fn resolution(span: TextRange, len: u32) -> Self {
        Self::Resolution { span, len }
    }

    pub fn conflicting_edits(rule_id: impl Into<String>, first: TextRange, second: TextRange) -> Self {
        Self::ConflictingEdits {
            rule_id: rule_id.into(),
            first,
            second,
        }
    }

    pub fn mixed_rules(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::MixedRules {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn reparse(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Reparse {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    pub fn invalid_edit(message: impl Into<String>) -> Self {
        Self::InvalidEdit {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for KemptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_fatal_kinds() {
        let range = TextRange::new(0.into(), 2.into());
        assert!(KemptError::conflicting_edits("r", range, range).is_batch_fatal());
        assert!(KemptError::mixed_rules("a", "b").is_batch_fatal());
        assert!(KemptError::reparse("r", "boom").is_batch_fatal());
        assert!(!KemptError::resolution(range, 1).is_batch_fatal());
        assert!(KemptError::resolution(range, 1).is_recoverable());
        assert!(!KemptError::config_error("bad").is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = KemptError::conflicting_edits(
            "spacing/no-multiple-whitespace",
            TextRange::new(1.into(), 4.into()),
            TextRange::new(3.into(), 5.into()),
        );
        assert_eq!(
            err.to_string(),
            "Conflicting edits for rule 'spacing/no-multiple-whitespace': 1..4 overlaps 3..5"
        );
    }
}
