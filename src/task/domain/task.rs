//! Task record and related classification types.

use super::{DueInstant, ParseTaskStatusError, RoomName, TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of academic work a task represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Graded homework or project work.
    #[default]
    Assignment,
    /// Scheduled examination.
    Exam,
    /// Course announcement with a date attached.
    Announcement,
    /// Short quiz.
    Quiz,
}

impl TaskKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assignment => "assignment",
            Self::Exam => "exam",
            Self::Announcement => "announcement",
            Self::Quiz => "quiz",
        }
    }
}

impl TryFrom<&str> for TaskKind {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "assignment" => Ok(Self::Assignment),
            "exam" => Ok(Self::Exam),
            "announcement" => Ok(Self::Announcement),
            "quiz" => Ok(Self::Quiz),
            _ => Err(TaskDomainError::InvalidTaskKind(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Submission status of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not been handed in.
    #[default]
    Pending,
    /// Work has been handed in.
    Submitted,
    /// Task is closed.
    Finished,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Finished => "finished",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "submitted" => Ok(Self::Submitted),
            "finished" => Ok(Self::Finished),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Optional descriptive fields carried over from the source record.
///
/// None of these influence deduplication or ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDetails {
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Points available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    /// Relative weight, e.g. 100 for a high-stakes task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Exam location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Syllabus coverage for exams.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syllabus_cover: Option<String>,
}

/// Canonical task record.
///
/// The `id` is the sole identity key: two tasks with the same identifier are
/// the same logical task regardless of any other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    room: Option<RoomName>,
    course_label: String,
    title: String,
    due: DueInstant,
    #[serde(default)]
    kind: TaskKind,
    #[serde(default)]
    status: TaskStatus,
    synced_at: DateTime<Utc>,
    #[serde(flatten)]
    details: TaskDetails,
}

impl Task {
    /// Creates a pending task with no room, kind `assignment` and no details.
    #[must_use]
    pub fn new(
        id: TaskId,
        course_label: impl Into<String>,
        title: impl Into<String>,
        due: impl Into<DueInstant>,
        synced_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            room: None,
            course_label: course_label.into(),
            title: title.into(),
            due: due.into(),
            kind: TaskKind::default(),
            status: TaskStatus::default(),
            synced_at,
            details: TaskDetails::default(),
        }
    }

    /// Sets the owning room.
    #[must_use]
    pub fn with_room(mut self, room: RoomName) -> Self {
        self.room = Some(room);
        self
    }

    /// Sets the task kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the submission status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the optional descriptive fields.
    #[must_use]
    pub fn with_details(mut self, details: TaskDetails) -> Self {
        self.details = details;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the owning room, if assigned.
    #[must_use]
    pub const fn room(&self) -> Option<&RoomName> {
        self.room.as_ref()
    }

    /// Returns the course or source label.
    #[must_use]
    pub fn course_label(&self) -> &str {
        &self.course_label
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the due time.
    #[must_use]
    pub const fn due(&self) -> &DueInstant {
        &self.due
    }

    /// Returns the task kind.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Returns the submission status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns when the record was last ingested.
    #[must_use]
    pub const fn synced_at(&self) -> DateTime<Utc> {
        self.synced_at
    }

    /// Returns the optional descriptive fields.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Stamps the owning room when none is set yet.
    ///
    /// A room assigned at intake is kept; persisted tasks always carry one.
    pub fn assign_room_if_absent(&mut self, room: &RoomName) {
        if self.room.is_none() {
            self.room = Some(room.clone());
        }
    }
}
