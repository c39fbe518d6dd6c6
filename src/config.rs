//! Configuration for the triage pipeline.
//!
//! Defaults reproduce the canonical urgency windows (24 hours critical, 72
//! hours upcoming). A TOML document may override any field; omitted fields
//! fall back to their defaults.
//!
//! # Examples
//!
//! ```
//! use taskmate::config::TriageConfig;
//!
//! let config = TriageConfig::from_toml_str(
//!     r#"
//!     [intake]
//!     utc_offset_minutes = 540
//!     "#,
//! )
//! .expect("valid config");
//! assert_eq!(config.intake.utc_offset_minutes, 540);
//! assert_eq!(config.scheduler.critical_window_ms, 86_400_000);
//! ```

use chrono::{FixedOffset, NaiveTime, Offset, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Milliseconds in one hour.
pub const HOUR_MS: i64 = 3_600_000;

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * HOUR_MS;

const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// Errors returned while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse triage config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An urgency window is zero or negative.
    #[error("urgency window must be positive, got {0} ms")]
    NonPositiveWindow(i64),

    /// The critical window extends beyond the upcoming window.
    #[error("critical window ({critical_ms} ms) exceeds upcoming window ({upcoming_ms} ms)")]
    InvertedWindows {
        /// Configured critical window.
        critical_ms: i64,
        /// Configured upcoming window.
        upcoming_ms: i64,
    },

    /// The UTC offset lies outside ±24 hours.
    #[error("utc offset of {0} minutes is out of range")]
    OffsetOutOfRange(i32),
}

/// Top-level triage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Intake normalisation settings.
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Priority scheduling settings.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl TriageConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, or a validation
    /// error when the parsed values are inconsistent.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.intake.validate()?;
        self.scheduler.validate()
    }
}

/// `[intake]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Course label used when a structured record carries none.
    #[serde(default = "default_course_label")]
    pub default_course_label: String,

    /// Offset applied to local date/times found in scanned text.
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Time of day assumed for date-only mentions in scanned text.
    #[serde(default = "default_date_only_due_time")]
    pub date_only_due_time: NaiveTime,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            default_course_label: default_course_label(),
            utc_offset_minutes: 0,
            date_only_due_time: default_date_only_due_time(),
        }
    }
}

impl IntakeConfig {
    /// Returns the configured offset, falling back to UTC when out of range.
    #[must_use]
    pub fn fixed_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.utc_offset_minutes.unsigned_abs() >= MAX_OFFSET_MINUTES.unsigned_abs() {
            return Err(ConfigError::OffsetOutOfRange(self.utc_offset_minutes));
        }
        Ok(())
    }
}

fn default_course_label() -> String {
    "Unknown Course".into()
}

fn default_date_only_due_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

/// `[scheduler]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Exclusive upper bound of the Critical band, in milliseconds.
    #[serde(default = "default_critical_window_ms")]
    pub critical_window_ms: i64,

    /// Exclusive upper bound of the Upcoming band, in milliseconds.
    #[serde(default = "default_upcoming_window_ms")]
    pub upcoming_window_ms: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            critical_window_ms: default_critical_window_ms(),
            upcoming_window_ms: default_upcoming_window_ms(),
        }
    }
}

impl SchedulerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for window in [self.critical_window_ms, self.upcoming_window_ms] {
            if window <= 0 {
                return Err(ConfigError::NonPositiveWindow(window));
            }
        }
        if self.critical_window_ms > self.upcoming_window_ms {
            return Err(ConfigError::InvertedWindows {
                critical_ms: self.critical_window_ms,
                upcoming_ms: self.upcoming_window_ms,
            });
        }
        Ok(())
    }
}

const fn default_critical_window_ms() -> i64 {
    DAY_MS
}

const fn default_upcoming_window_ms() -> i64 {
    3 * DAY_MS
}
