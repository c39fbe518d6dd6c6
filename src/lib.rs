//! Taskmate: deadline triage for shared study rooms.
//!
//! This crate turns raw coursework records into a ranked, classified view of
//! what is due next in each room.
//!
//! # Architecture
//!
//! Taskmate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task model with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and notification
//! - **Adapters**: Concrete implementations of ports (in-memory, logging)
//!
//! # Modules
//!
//! - [`task`]: Canonical task model and the room-scoped store
//! - [`intake`]: Normalisation of structured, textual and simulated sources
//! - [`triage`]: Reconciliation, priority scheduling and the triage service
//! - [`config`]: Urgency windows and intake settings

pub mod config;
pub mod intake;
pub mod task;
pub mod triage;

#[cfg(test)]
mod test_support;
