//! Integrity validation of incoming task batches.
//!
//! Reconciliation turns freshly normalised records into a set that is safe to
//! merge into the known store: well-formed, and new by identity.

use crate::task::domain::{RoomName, Task, TaskId};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// Why an incoming task failed the structural check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// The identifier is blank.
    BlankId,
    /// The due time never resolved to an instant.
    UnresolvableDueTime(String),
    /// The record names a room other than the one being filled.
    ForeignRoom(RoomName),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankId => write!(f, "blank task identifier"),
            Self::UnresolvableDueTime(raw) => write!(f, "unresolvable due time '{raw}'"),
            Self::ForeignRoom(other) => write!(f, "belongs to room '{other}'"),
        }
    }
}

/// A structurally invalid task dropped during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Identifier as received (may be blank).
    pub id: TaskId,
    /// Title as received, for diagnostics.
    pub title: String,
    /// Why the task was dropped.
    pub reason: RejectionReason,
}

/// Outcome of reconciling an incoming batch against the known set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    accepted: Vec<Task>,
    rejected: Vec<Rejection>,
    duplicates: Vec<TaskId>,
}

impl Reconciliation {
    /// Returns the surviving tasks in their incoming order.
    #[must_use]
    pub fn accepted(&self) -> &[Task] {
        &self.accepted
    }

    /// Consumes the outcome, returning the surviving tasks.
    #[must_use]
    pub fn into_accepted(self) -> Vec<Task> {
        self.accepted
    }

    /// Returns the structurally invalid tasks.
    #[must_use]
    pub fn rejected(&self) -> &[Rejection] {
        &self.rejected
    }

    /// Returns identifiers dropped because they were already known.
    #[must_use]
    pub fn duplicates(&self) -> &[TaskId] {
        &self.duplicates
    }

    /// Splits the outcome into accepted tasks, rejections and duplicates.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Task>, Vec<Rejection>, Vec<TaskId>) {
        (self.accepted, self.rejected, self.duplicates)
    }
}

/// Filters `incoming` down to well-formed tasks whose identifiers are not in
/// `known`.
///
/// Relative order is preserved. A repeat of an identifier accepted earlier in
/// the same batch counts as a duplicate too, so the output never contains the
/// same identifier twice. Reconciling the output again against
/// `known ∪ output` yields nothing.
#[must_use]
pub fn reconcile(incoming: Vec<Task>, known: &[Task]) -> Reconciliation {
    let mut seen: HashSet<TaskId> = known.iter().map(|task| task.id().clone()).collect();
    let mut outcome = Reconciliation::default();

    for task in incoming {
        if let Some(reason) = structural_defect(&task) {
            warn!(id = %task.id(), title = task.title(), %reason, "skipping invalid task");
            outcome.rejected.push(Rejection {
                id: task.id().clone(),
                title: task.title().to_owned(),
                reason,
            });
            continue;
        }

        if seen.insert(task.id().clone()) {
            outcome.accepted.push(task);
        } else {
            outcome.duplicates.push(task.id().clone());
        }
    }

    debug!(
        accepted = outcome.accepted.len(),
        rejected = outcome.rejected.len(),
        duplicates = outcome.duplicates.len(),
        "reconciled incoming tasks"
    );
    outcome
}

fn structural_defect(task: &Task) -> Option<RejectionReason> {
    if task.id().is_blank() {
        return Some(RejectionReason::BlankId);
    }
    match task.due().instant() {
        Some(_) => None,
        None => Some(RejectionReason::UnresolvableDueTime(task.due().to_string())),
    }
}

/// Splits off tasks that already name a room other than `room`.
///
/// Tasks without a room, or naming `room` itself, are kept in order.
#[must_use]
pub fn split_foreign(incoming: Vec<Task>, room: &RoomName) -> (Vec<Task>, Vec<Rejection>) {
    let mut local = Vec::with_capacity(incoming.len());
    let mut foreign = Vec::new();

    for task in incoming {
        match task.room() {
            Some(other) if other != room => {
                warn!(id = %task.id(), %room, other = %other, "skipping task from another room");
                foreign.push(Rejection {
                    id: task.id().clone(),
                    title: task.title().to_owned(),
                    reason: RejectionReason::ForeignRoom(other.clone()),
                });
            }
            _ => local.push(task),
        }
    }
    (local, foreign)
}
