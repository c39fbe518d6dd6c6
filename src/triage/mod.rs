//! Deadline triage: reconciliation, priority scheduling and the triage feed.
//!
//! The pure core lives in [`validator`] and [`scheduler`]. Everything async
//! sits at the edges:
//!
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod ports;
pub mod scheduler;
pub mod services;
pub mod validator;

pub use scheduler::{RemainingTime, ScheduledTask, UrgencyClass, schedule, schedule_default};
pub use validator::{Reconciliation, Rejection, RejectionReason, reconcile, split_foreign};

#[cfg(test)]
mod tests;
