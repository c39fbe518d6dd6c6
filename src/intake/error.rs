//! Intake error types.

use thiserror::Error;

/// Why a single external record could not be normalised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedReason {
    /// A required field is absent or null.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// The due-time text is not a valid RFC 3339 timestamp.
    #[error("unparsable due time '{0}'")]
    UnparsableDueTime(String),

    /// A field is present but holds an unusable value.
    #[error("invalid field '{field}': {message}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the problem.
        message: String,
    },
}

/// Non-fatal intake failures, reported per record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// A record lacks required fields or carries unparsable data.
    #[error("malformed record at index {index}: {reason}")]
    MalformedRecord {
        /// Position of the record in the input batch.
        index: usize,
        /// What was wrong with it.
        reason: MalformedReason,
    },
}
