//! Step definitions for room deadline triage scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
