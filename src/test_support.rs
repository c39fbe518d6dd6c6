//! Shared fixtures for unit tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a UTC instant, panicking on impossible dates.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

/// Reference instant used throughout the scheduling scenarios.
pub fn reference_now() -> DateTime<Utc> {
    utc(2026, 2, 8, 0, 0)
}
