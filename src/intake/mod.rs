//! Intake normalisation of externally-sourced task records.
//!
//! Three sources feed the pipeline, each producing canonical
//! [`Task`](crate::task::domain::Task) values:
//!
//! - structured payloads from a third-party API ([`normalize_structured`])
//! - unstructured announcement text ([`normalize_text`])
//! - a deterministic simulation seed ([`seed_simulated`])
//!
//! Normalisation is record-at-a-time. A bad record is excluded and reported;
//! it never aborts the batch.

mod error;
mod simulation;
mod structured;
mod text;

pub use error::{IntakeError, MalformedReason};
pub use simulation::seed_simulated;
pub use structured::{ExternalRecord, Normalized, normalize_structured};
pub use text::normalize_text;

#[cfg(test)]
mod tests;
