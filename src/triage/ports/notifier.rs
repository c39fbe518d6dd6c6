//! Notifier port for critical-deadline notices.

use crate::task::domain::{RoomName, TaskId};
use crate::triage::{ScheduledTask, UrgencyClass};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Result type for notifier operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Errors returned by notifier implementations.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The notice payload could not be encoded.
    #[error("failed to encode notice payload: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The downstream channel refused or dropped the notice.
    #[error("notice delivery failed: {0}")]
    Delivery(String),
}

/// One critical task inside a notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeEntry {
    /// Task identifier.
    pub id: TaskId,
    /// Course or source label.
    pub course_label: String,
    /// Task title.
    pub title: String,
    /// Rendered remaining-time label.
    pub remaining: String,
}

/// Notice raised when a triage view contains critical tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineNotice {
    /// Room the view was computed for.
    pub room: RoomName,
    /// Reference instant of the view.
    pub computed_at: DateTime<Utc>,
    /// Critical tasks, most urgent first.
    pub critical: Vec<NoticeEntry>,
}

impl DeadlineNotice {
    /// Builds a notice from scheduled tasks, or `None` when nothing is
    /// critical.
    #[must_use]
    pub fn from_scheduled(
        room: &RoomName,
        computed_at: DateTime<Utc>,
        tasks: &[ScheduledTask],
    ) -> Option<Self> {
        let critical: Vec<NoticeEntry> = tasks
            .iter()
            .filter(|entry| entry.urgency() == UrgencyClass::Critical)
            .map(|entry| NoticeEntry {
                id: entry.task().id().clone(),
                course_label: entry.task().course_label().to_owned(),
                title: entry.task().title().to_owned(),
                remaining: entry.remaining_label(),
            })
            .collect();

        (!critical.is_empty()).then(|| Self {
            room: room.clone(),
            computed_at,
            critical,
        })
    }

    /// Returns a one-line summary suitable for a push message.
    #[must_use]
    pub fn message(&self) -> String {
        match self.critical.as_slice() {
            [only] => format!(
                "{} ({}) is due soon: {}",
                only.title, only.course_label, only.remaining
            ),
            entries => format!("{} tasks in room {} are due soon", entries.len(), self.room),
        }
    }
}

/// Delivery contract for deadline notices.
#[async_trait]
pub trait DeadlineNotifier: Send + Sync {
    /// Delivers a notice.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError`] when the notice cannot be encoded or
    /// delivered.
    async fn notify(&self, notice: &DeadlineNotice) -> NotifyResult<()>;
}
