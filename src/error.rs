//! Error types for the tour engine.
//!
//! Cancellation is deliberately absent from [`TspError`]: a cancelled run is
//! a normal outcome and is reported through the `cancelled` flag of each
//! result type.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for tour construction, search, and I/O.
#[derive(Debug, Error)]
pub enum TspError {
    /// A point file could not be opened or read.
    #[error("input unavailable: {path}: {source}")]
    InputUnavailable {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A token in the coordinate section is not a valid number.
    #[error("parse error on line {line}: unexpected token {token:?}")]
    Parse {
        /// 1-based line number of the offending token.
        line: usize,
        /// The token as read (empty when a triple was truncated at end of input).
        token: String,
    },

    /// A point or tour position beyond the current length was requested.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the indexed sequence.
        len: usize,
    },

    /// The instance is too small for the requested operation.
    #[error("degenerate instance with {len} point(s)")]
    DegenerateInstance {
        /// Number of points in the instance.
        len: usize,
    },

    /// A tour handed to a strategy is not a permutation of its instance.
    #[error("invalid tour: {0}")]
    InvalidTour(String),

    /// A strategy configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing a solution failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tour engine operations.
pub type Result<T> = std::result::Result<T, TspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_index_out_of_range() {
        let err = TspError::IndexOutOfRange { index: 7, len: 4 };
        assert_eq!(err.to_string(), "index 7 out of range for length 4");
    }

    #[test]
    fn test_display_parse() {
        let err = TspError::Parse {
            line: 9,
            token: "1x".into(),
        };
        assert_eq!(err.to_string(), "parse error on line 9: unexpected token \"1x\"");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: TspError = io.into();
        assert!(matches!(err, TspError::Io(_)));
    }
}
