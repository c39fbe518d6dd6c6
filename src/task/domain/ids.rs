//! Identifier and validated scalar types for the task domain.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a task record, unique within a room.
///
/// Identifiers originate outside the system, so deserialised values are not
/// re-validated; the integrity validator rejects blank identifiers instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskId`] if the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTaskId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Wraps an identifier produced inside the crate.
    ///
    /// Callers guarantee the value is non-blank.
    pub(crate) fn generated(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns `true` when the identifier carries no usable characters.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of the shared collaboration scope a task set belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
    /// Creates a validated room name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidRoomName`] if the value is blank or
    /// contains control characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_control) {
            return Err(TaskDomainError::InvalidRoomName(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the room name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RoomName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
