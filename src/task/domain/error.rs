//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The room name is blank or contains control characters.
    #[error("invalid room name '{0}'")]
    InvalidRoomName(String),

    /// The task kind value is unsupported.
    #[error("unsupported task kind: {0}")]
    InvalidTaskKind(String),
}

/// Error returned while parsing task statuses from external records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
