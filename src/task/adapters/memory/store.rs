//! Thread-safe in-memory task store.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::watch;
use tracing::debug;

use crate::task::{
    domain::{RoomName, Task},
    ports::{RoomSubscription, TaskStore, TaskStoreError, TaskStoreResult},
};

/// In-memory task store keyed by room.
///
/// Each room's task set lives inside a `watch` sender, so the current value
/// doubles as the snapshot delivered to subscribers.
#[derive(Debug, Clone)]
pub struct InMemoryTaskStore {
    rooms: Arc<RwLock<HashMap<RoomName, watch::Sender<Vec<Task>>>>>,
    available: Arc<AtomicBool>,
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self {
            rooms: Arc::default(),
            available: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl InMemoryTaskStore {
    /// Creates an empty, reachable store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the source becoming unreachable (or reachable again).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Drops a room, closing every subscription to it.
    ///
    /// Returns `true` when the room existed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the lock is poisoned.
    pub fn close_room(&self, room: &RoomName) -> TaskStoreResult<bool> {
        let mut rooms = self.rooms.write().map_err(poisoned)?;
        Ok(rooms.remove(room).is_some())
    }

    /// Returns how many subscriptions to `room` are still open.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the lock is poisoned.
    pub fn subscriber_count(&self, room: &RoomName) -> TaskStoreResult<usize> {
        let rooms = self.rooms.read().map_err(poisoned)?;
        Ok(rooms.get(room).map_or(0, watch::Sender::receiver_count))
    }

    fn ensure_available(&self, room: &RoomName) -> TaskStoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(TaskStoreError::Unavailable(room.clone()))
        }
    }
}

fn poisoned<E: ToString>(err: E) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn fetch_room(&self, room: &RoomName) -> TaskStoreResult<Vec<Task>> {
        self.ensure_available(room)?;
        let rooms = self.rooms.read().map_err(poisoned)?;
        Ok(rooms
            .get(room)
            .map(|sender| sender.borrow().clone())
            .unwrap_or_default())
    }

    async fn merge(&self, room: &RoomName, tasks: Vec<Task>) -> TaskStoreResult<usize> {
        self.ensure_available(room)?;
        let mut rooms = self.rooms.write().map_err(poisoned)?;
        let sender = rooms
            .entry(room.clone())
            .or_insert_with(|| watch::channel(Vec::new()).0);

        {
            let current = sender.borrow();
            let mut seen: HashSet<_> = current.iter().map(|task| task.id().clone()).collect();
            if let Some(duplicate) = tasks.iter().find(|task| !seen.insert(task.id().clone())) {
                return Err(TaskStoreError::DuplicateTask(duplicate.id().clone()));
            }
        }

        let added = tasks.len();
        sender.send_modify(|current| {
            current.extend(tasks.into_iter().map(|mut task| {
                task.assign_room_if_absent(room);
                task
            }));
        });
        debug!(%room, added, "merged tasks into room");
        Ok(added)
    }

    async fn subscribe(&self, room: &RoomName) -> TaskStoreResult<RoomSubscription> {
        self.ensure_available(room)?;
        let mut rooms = self.rooms.write().map_err(poisoned)?;
        let sender = rooms
            .entry(room.clone())
            .or_insert_with(|| watch::channel(Vec::new()).0);
        Ok(sender.subscribe())
    }
}
