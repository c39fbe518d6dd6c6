//! Scanning of unstructured text for task-like mentions.
//!
//! Recognises one mention per line of the form
//! `<keyword> ... due [on|by] YYYY-MM-DD [HH:MM]`, for example
//! `Quiz 2: vocabulary due by 2026-02-09 10:00`.

use crate::config::IntakeConfig;
use crate::task::domain::{Task, TaskId, TaskKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use mockable::Clock;
use regex::{Captures, Regex};
use sha2::{Digest, Sha256};
use std::sync::LazyLock;
use tracing::debug;

/// Prefix marking identifiers derived from scanned content.
const SCAN_ID_PREFIX: &str = "scan-";

/// Bytes of the content digest kept in scanned identifiers.
const SCAN_ID_DIGEST_BYTES: usize = 8;

const FIELD_SEPARATOR: &[u8] = b"\x1f";

#[expect(
    clippy::expect_used,
    reason = "pattern is a compile-time constant covered by unit tests"
)]
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\W*(?P<title>.*?\b(?P<keyword>assignment|homework|project|quiz|midterm|final|exam)s?\b.*?)[\s:,;-]*\bdue\b(?:\s+(?:on|by))?[\s:]*(?P<date>\d{4}-\d{2}-\d{2})(?:[ T](?P<time>\d{2}:\d{2}))?",
    )
    .expect("valid regex")
});

/// Extracts task mentions from free-form text such as announcement bodies.
///
/// Date-only mentions fall due at the configured end-of-day time; all local
/// times use the configured UTC offset. Identifiers are derived from the
/// course, title and due instant, so rescanning the same text produces the
/// same identifiers. Text without recognisable mentions yields an empty
/// vector; this function never fails.
#[must_use]
pub fn normalize_text(
    raw_text: &str,
    course_label: &str,
    config: &IntakeConfig,
    clock: &impl Clock,
) -> Vec<Task> {
    let synced_at = clock.utc();
    let tasks: Vec<Task> = raw_text
        .lines()
        .filter_map(|line| MENTION_RE.captures(line))
        .filter_map(|captures| mention_to_task(&captures, course_label, config, synced_at))
        .collect();

    debug!(course = course_label, found = tasks.len(), "scanned text for task mentions");
    tasks
}

fn mention_to_task(
    captures: &Captures<'_>,
    course_label: &str,
    config: &IntakeConfig,
    synced_at: DateTime<Utc>,
) -> Option<Task> {
    let title = captures.name("title")?.as_str().trim();
    let keyword = captures.name("keyword")?.as_str();
    let due = resolve_due(captures, config)?;

    let id = scan_id(course_label, title, due);
    Some(Task::new(id, course_label, title, due, synced_at).with_kind(keyword_kind(keyword)))
}

fn resolve_due(captures: &Captures<'_>, config: &IntakeConfig) -> Option<DateTime<Utc>> {
    let raw_date = captures.name("date")?.as_str();
    let Ok(date) = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d") else {
        debug!(date = raw_date, "ignoring mention with impossible date");
        return None;
    };
    let time = match captures.name("time") {
        Some(raw_time) => NaiveTime::parse_from_str(raw_time.as_str(), "%H:%M").ok()?,
        None => config.date_only_due_time,
    };

    config
        .fixed_offset()
        .from_local_datetime(&NaiveDateTime::new(date, time))
        .single()
        .map(|local| local.with_timezone(&Utc))
}

fn keyword_kind(keyword: &str) -> TaskKind {
    match keyword.to_ascii_lowercase().as_str() {
        "quiz" => TaskKind::Quiz,
        "exam" | "midterm" | "final" => TaskKind::Exam,
        _ => TaskKind::Assignment,
    }
}

fn scan_id(course_label: &str, title: &str, due: DateTime<Utc>) -> TaskId {
    let mut hasher = Sha256::new();
    hasher.update(course_label.as_bytes());
    hasher.update(FIELD_SEPARATOR);
    hasher.update(title.as_bytes());
    hasher.update(FIELD_SEPARATOR);
    hasher.update(due.to_rfc3339_opts(SecondsFormat::Secs, true).as_bytes());
    let digest = hasher.finalize();

    let suffix: String = digest
        .iter()
        .take(SCAN_ID_DIGEST_BYTES)
        .map(|byte| format!("{byte:02x}"))
        .collect();
    TaskId::generated(format!("{SCAN_ID_PREFIX}{suffix}"))
}
