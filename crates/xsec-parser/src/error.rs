//! Error types for opacity file decoding.

use thiserror::Error;

/// Result type alias using ParseError.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while decoding opacity files.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Payload size or shape disagrees with what the format requires.
    #[error("format mismatch: {0}")]
    FormatMismatch(String),

    /// Record-framed stream whose word count does not fit the framing.
    #[error("corrupt record stream: {0}")]
    CorruptRecordStream(String),

    /// Malformed row in a text header table.
    #[error("invalid header at line {line}: {reason}")]
    InvalidHeader { line: usize, reason: String },

    /// File name does not follow the sample naming pattern.
    #[error("invalid sample filename '{name}': {reason}")]
    InvalidFilename { name: String, reason: String },
}

impl ParseError {
    pub fn format_mismatch(msg: impl Into<String>) -> Self {
        Self::FormatMismatch(msg.into())
    }

    pub fn corrupt_record_stream(msg: impl Into<String>) -> Self {
        Self::CorruptRecordStream(msg.into())
    }

    pub fn invalid_filename(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFilename {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
