//! Port contracts for the room-scoped task store.
//!
//! Ports define infrastructure-agnostic interfaces used by triage services.

pub mod store;

pub use store::{RoomSubscription, TaskStore, TaskStoreError, TaskStoreResult};
