//! Unit tests for the triage module.
//!
//! Scheduling scenarios share the reference instant
//! `2026-02-08T00:00:00Z`.

mod validator_tests;
