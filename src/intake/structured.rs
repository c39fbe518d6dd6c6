//! Normalisation of structured third-party API payloads.

use super::{IntakeError, MalformedReason};
use crate::config::IntakeConfig;
use crate::task::domain::{DueInstant, RoomName, Task, TaskDetails, TaskId, TaskKind, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Opaque key-value record as received from an external source.
pub type ExternalRecord = Map<String, Value>;

/// Outcome of normalising a batch of external records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Canonical tasks, in input order.
    pub tasks: Vec<Task>,
    /// One entry per excluded record.
    pub rejected: Vec<IntakeError>,
}

/// Converts structured records into canonical tasks.
///
/// Every record must carry an `id` (string or integer) and a `due_at` RFC 3339
/// timestamp. Records failing either check are excluded and reported in
/// [`Normalized::rejected`]; the rest of the batch is unaffected. Missing
/// `type` defaults to `assignment`, missing `status` to `pending`, and
/// `synced_at` is taken from `clock`.
#[must_use]
pub fn normalize_structured(
    records: &[ExternalRecord],
    config: &IntakeConfig,
    clock: &impl Clock,
) -> Normalized {
    let synced_at = clock.utc();
    let mut normalized = Normalized::default();

    for (index, record) in records.iter().enumerate() {
        match normalize_record(record, config, synced_at) {
            Ok(task) => normalized.tasks.push(task),
            Err(reason) => {
                let err = IntakeError::MalformedRecord { index, reason };
                warn!(index, error = %err, "skipping malformed record");
                normalized.rejected.push(err);
            }
        }
    }

    debug!(
        accepted = normalized.tasks.len(),
        rejected = normalized.rejected.len(),
        "normalised structured records"
    );
    normalized
}

fn normalize_record(
    record: &ExternalRecord,
    config: &IntakeConfig,
    synced_at: DateTime<Utc>,
) -> Result<Task, MalformedReason> {
    let id = required_id(record)?;
    let due = required_due(record)?;

    let course_label = optional_str(record, "course_name")?
        .unwrap_or(config.default_course_label.as_str())
        .to_owned();
    let title = optional_str(record, "title")?.unwrap_or_default().to_owned();

    let kind = optional_str(record, "type")?
        .map(TaskKind::try_from)
        .transpose()
        .map_err(|err| invalid("type", &err))?
        .unwrap_or_default();
    let status = optional_str(record, "status")?
        .map(TaskStatus::try_from)
        .transpose()
        .map_err(|err| invalid("status", &err))?
        .unwrap_or_default();

    let details = TaskDetails {
        description: optional_string(record, "description")?,
        points: optional_number(record, "points")?,
        weight: optional_number(record, "weight")?,
        location: optional_string(record, "location")?,
        syllabus_cover: optional_string(record, "syllabus_cover")?,
    };

    let mut task = Task::new(id, course_label, title, due, synced_at)
        .with_kind(kind)
        .with_status(status)
        .with_details(details);
    if let Some(raw_room) = optional_str(record, "room_name")? {
        let room = RoomName::new(raw_room).map_err(|err| invalid("room_name", &err))?;
        task = task.with_room(room);
    }
    Ok(task)
}

fn required_id(record: &ExternalRecord) -> Result<TaskId, MalformedReason> {
    let raw = match record.get("id") {
        None | Some(Value::Null) => return Err(MalformedReason::MissingField("id")),
        Some(Value::String(value)) => value.clone(),
        Some(Value::Number(value)) => value.to_string(),
        Some(other) => {
            return Err(MalformedReason::InvalidField {
                field: "id",
                message: format!("expected string or number, found {other}"),
            });
        }
    };
    TaskId::new(raw).map_err(|_| MalformedReason::MissingField("id"))
}

fn required_due(record: &ExternalRecord) -> Result<DueInstant, MalformedReason> {
    let raw = optional_str(record, "due_at")?.ok_or(MalformedReason::MissingField("due_at"))?;
    match DueInstant::parse(raw) {
        resolved @ DueInstant::Resolved(_) => Ok(resolved),
        DueInstant::Unresolved(text) => Err(MalformedReason::UnparsableDueTime(text)),
    }
}

/// Returns a non-blank string field; absent, null and blank values are `None`.
fn optional_str<'a>(
    record: &'a ExternalRecord,
    field: &'static str,
) -> Result<Option<&'a str>, MalformedReason> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => {
            let trimmed = value.trim();
            Ok((!trimmed.is_empty()).then_some(trimmed))
        }
        Some(other) => Err(MalformedReason::InvalidField {
            field,
            message: format!("expected string, found {other}"),
        }),
    }
}

fn optional_string(
    record: &ExternalRecord,
    field: &'static str,
) -> Result<Option<String>, MalformedReason> {
    Ok(optional_str(record, field)?.map(str::to_owned))
}

fn optional_number(
    record: &ExternalRecord,
    field: &'static str,
) -> Result<Option<f64>, MalformedReason> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(value)) => Ok(value.as_f64()),
        Some(other) => Err(MalformedReason::InvalidField {
            field,
            message: format!("expected number, found {other}"),
        }),
    }
}

fn invalid(field: &'static str, err: &impl std::error::Error) -> MalformedReason {
    MalformedReason::InvalidField {
        field,
        message: err.to_string(),
    }
}
