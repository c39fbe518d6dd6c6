//! Store port for the externally-owned, room-keyed task collection.

use crate::task::domain::{RoomName, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Subscription to a room's task set.
///
/// Each change delivers the full current set; there is no delta protocol.
/// The subscription closes when the store drops the room.
pub type RoomSubscription = watch::Receiver<Vec<Task>>;

/// Room-scoped task collection contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task currently known for the room.
    ///
    /// Unknown rooms yield an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] when the source cannot be
    /// reached.
    async fn fetch_room(&self, room: &RoomName) -> TaskStoreResult<Vec<Task>>;

    /// Merges reconciled tasks into the room and returns how many were added.
    ///
    /// Tasks without a room are stamped with `room` before storage. The merge
    /// is all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when an identifier already
    /// exists in the room, or [`TaskStoreError::Unavailable`] when the
    /// source cannot be reached.
    async fn merge(&self, room: &RoomName, tasks: Vec<Task>) -> TaskStoreResult<usize>;

    /// Subscribes to full-set change notifications for the room.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] when the source cannot be
    /// reached.
    async fn subscribe(&self, room: &RoomName) -> TaskStoreResult<RoomSubscription>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists in the room.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The external source could not be reached.
    #[error("task source unavailable for room {0}")]
    Unavailable(RoomName),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
