//! Time-based priority scoring and urgency classification.
//!
//! The scheduler is a pure function of its inputs: callers supply `now`
//! explicitly, and identical inputs always produce identically ordered
//! output.

use crate::config::{DAY_MS, HOUR_MS, SchedulerConfig};
use crate::task::domain::{Task, TaskKind};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::warn;

/// Discrete urgency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UrgencyClass {
    /// Due within the critical window.
    Critical,
    /// Due within the upcoming window.
    Upcoming,
    /// Due later than the upcoming window.
    Planned,
    /// Already past due.
    Finished,
    /// Due time could not be resolved.
    Unknown,
}

impl UrgencyClass {
    /// Returns the band's display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Upcoming => "Upcoming",
            Self::Planned => "Planned",
            Self::Finished => "Finished",
            Self::Unknown => "Unknown",
        }
    }

    /// Classifies a signed millisecond delta; bounds are exclusive.
    #[must_use]
    pub const fn classify(diff_ms: i64, config: &SchedulerConfig) -> Self {
        if diff_ms < 0 {
            Self::Finished
        } else if diff_ms < config.critical_window_ms {
            Self::Critical
        } else if diff_ms < config.upcoming_window_ms {
            Self::Upcoming
        } else {
            Self::Planned
        }
    }
}

impl fmt::Display for UrgencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Human-oriented remaining time before a task falls due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemainingTime {
    /// The due time has passed.
    Overdue,
    /// Less than a day remains; whole hours, floored.
    Hours(i64),
    /// At least a day remains; whole days derived from floored hours.
    Days(i64),
    /// The due time could not be resolved.
    Unknown,
}

impl RemainingTime {
    /// Derives the remaining time from a signed millisecond delta.
    ///
    /// Days are computed as `floor(floor(hours) / 24)`, so 47h59m reports one
    /// day.
    #[must_use]
    pub const fn from_millis(diff_ms: i64) -> Self {
        if diff_ms < 0 {
            return Self::Overdue;
        }
        let hours = diff_ms.div_euclid(HOUR_MS);
        if diff_ms < DAY_MS {
            Self::Hours(hours)
        } else {
            Self::Days(hours.div_euclid(24))
        }
    }
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Overdue => write!(f, "overdue"),
            Self::Hours(1) => write!(f, "1 hour remaining"),
            Self::Hours(hours) => write!(f, "{hours} hours remaining"),
            Self::Days(1) => write!(f, "1 day remaining"),
            Self::Days(days) => write!(f, "{days} days remaining"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for RemainingTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A task projected onto a reference instant.
///
/// Recomputed on every scheduling pass and never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledTask {
    #[serde(flatten)]
    task: Task,
    priority_score: Option<i64>,
    remaining: RemainingTime,
    urgency: UrgencyClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    exam_countdown: Option<String>,
}

impl ScheduledTask {
    fn project(task: Task, now: DateTime<Utc>, config: &SchedulerConfig) -> Self {
        let Some(due) = task.due().instant() else {
            warn!(id = %task.id(), due = %task.due(), "unresolvable due time, sorting last");
            return Self {
                task,
                priority_score: None,
                remaining: RemainingTime::Unknown,
                urgency: UrgencyClass::Unknown,
                exam_countdown: None,
            };
        };

        // Both instants are floored to whole milliseconds before subtracting.
        let diff_ms = due.timestamp_millis() - now.timestamp_millis();
        let remaining = RemainingTime::from_millis(diff_ms);
        let exam_countdown = if task.kind() == TaskKind::Exam {
            countdown_label(remaining)
        } else {
            None
        };
        Self {
            task,
            priority_score: Some(diff_ms),
            remaining,
            urgency: UrgencyClass::classify(diff_ms, config),
            exam_countdown,
        }
    }

    /// Returns the underlying task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Consumes the projection, returning the underlying task.
    #[must_use]
    pub fn into_task(self) -> Task {
        self.task
    }

    /// Returns the signed millisecond delta used as the sort key.
    ///
    /// `None` when the due time could not be resolved.
    #[must_use]
    pub const fn priority_score(&self) -> Option<i64> {
        self.priority_score
    }

    /// Returns the remaining time.
    #[must_use]
    pub const fn remaining(&self) -> RemainingTime {
        self.remaining
    }

    /// Returns the rendered remaining-time label.
    #[must_use]
    pub fn remaining_label(&self) -> String {
        self.remaining.to_string()
    }

    /// Returns the urgency band.
    #[must_use]
    pub const fn urgency(&self) -> UrgencyClass {
        self.urgency
    }

    /// Returns the `D-N` countdown for upcoming exams.
    #[must_use]
    pub fn exam_countdown(&self) -> Option<&str> {
        self.exam_countdown.as_deref()
    }
}

fn countdown_label(remaining: RemainingTime) -> Option<String> {
    match remaining {
        RemainingTime::Hours(_) | RemainingTime::Days(0) => Some("D-Day".to_owned()),
        RemainingTime::Days(days) => Some(format!("D-{days}")),
        RemainingTime::Overdue | RemainingTime::Unknown => None,
    }
}

/// Ranks tasks by urgency relative to `now`.
///
/// The result is sorted ascending by priority score (most urgent first).
/// Equal scores keep their input order. Tasks whose due time cannot be
/// resolved are classified [`UrgencyClass::Unknown`] and placed last, also
/// in input order.
#[must_use]
pub fn schedule(
    tasks: Vec<Task>,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> Vec<ScheduledTask> {
    let mut scheduled: Vec<ScheduledTask> = tasks
        .into_iter()
        .map(|task| ScheduledTask::project(task, now, config))
        .collect();
    scheduled.sort_by_key(|entry| (entry.priority_score.is_none(), entry.priority_score));
    scheduled
}

/// Ranks tasks using the default 24-hour and 72-hour windows.
#[must_use]
pub fn schedule_default(tasks: Vec<Task>, now: DateTime<Utc>) -> Vec<ScheduledTask> {
    schedule(tasks, now, &SchedulerConfig::default())
}
