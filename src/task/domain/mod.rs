//! Domain model for room-scoped academic tasks.
//!
//! A [`Task`] is the durable, identity-bearing record owned by the external
//! store. Everything here is free of infrastructure concerns; intake,
//! validation and scheduling build on these types.

mod due;
mod error;
mod ids;
mod task;

pub use due::DueInstant;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{RoomName, TaskId};
pub use task::{Task, TaskDetails, TaskKind, TaskStatus};
