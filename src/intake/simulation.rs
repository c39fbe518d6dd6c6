//! Deterministic seed data for rooms without a backing source.

use crate::task::domain::{RoomName, Task, TaskId, TaskKind};
use chrono::{DateTime, TimeDelta, Utc};

struct SeedTask {
    id: &'static str,
    course_label: &'static str,
    title: &'static str,
    kind: TaskKind,
    due_in_days: i64,
}

const SEED_TASKS: [SeedTask; 3] = [
    SeedTask {
        id: "sim-quiz-1",
        course_label: "Basic Spanish",
        title: "Vocabulary quiz",
        kind: TaskKind::Quiz,
        due_in_days: 1,
    },
    SeedTask {
        id: "sim-algo-1",
        course_label: "Algorithm Design",
        title: "Implement Dijkstra",
        kind: TaskKind::Assignment,
        due_in_days: 2,
    },
    SeedTask {
        id: "sim-mkt-1",
        course_label: "Principles of Marketing",
        title: "Market research report",
        kind: TaskKind::Assignment,
        due_in_days: 10,
    },
];

/// Produces the fixed demonstration task set anchored at `reference`.
///
/// The set is a quiz due in one day, an assignment due in two days and an
/// assignment due in ten days. Every task is pending, belongs to `room` and
/// was synced at `reference`. Identical inputs always yield identical output.
#[must_use]
pub fn seed_simulated(room: &RoomName, reference: DateTime<Utc>) -> Vec<Task> {
    SEED_TASKS
        .iter()
        .filter_map(|seed| {
            let due = reference.checked_add_signed(TimeDelta::try_days(seed.due_in_days)?)?;
            Some(
                Task::new(
                    TaskId::generated(seed.id),
                    seed.course_label,
                    seed.title,
                    due,
                    reference,
                )
                .with_kind(seed.kind)
                .with_room(room.clone()),
            )
        })
        .collect()
}
