//! Tests for batch reconciliation.

use crate::task::domain::{DueInstant, RoomName, Task, TaskId};
use crate::test_support::reference_now;
use crate::triage::{RejectionReason, reconcile, split_foreign};
use rstest::rstest;

fn task(id: &str) -> Task {
    Task::new(
        TaskId::new(id).expect("valid task id"),
        "Algorithms",
        format!("Task {id}"),
        reference_now(),
        reference_now(),
    )
}

fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.id().as_str()).collect()
}

#[rstest]
fn known_identifier_is_dropped() {
    let known = vec![task("1")];
    let incoming = vec![task("1"), task("2")];

    let outcome = reconcile(incoming, &known);

    assert_eq!(ids(outcome.accepted()), vec!["2"]);
    let duplicates: Vec<_> = outcome.duplicates().iter().map(TaskId::as_str).collect();
    assert_eq!(duplicates, vec!["1"]);
}

#[rstest]
fn identity_ignores_other_field_differences() {
    let known = vec![task("1")];
    let changed = Task::new(
        TaskId::new("1").expect("valid task id"),
        "Another course",
        "Renamed",
        reference_now(),
        reference_now(),
    );

    let outcome = reconcile(vec![changed], &known);

    assert!(outcome.accepted().is_empty());
    assert_eq!(outcome.duplicates().len(), 1);
}

#[rstest]
fn surviving_order_matches_incoming_order() {
    let known = vec![task("c")];
    let incoming = vec![task("e"), task("c"), task("a"), task("d"), task("b")];

    let outcome = reconcile(incoming, &known);

    assert_eq!(ids(outcome.accepted()), vec!["e", "a", "d", "b"]);
}

#[rstest]
fn structurally_invalid_tasks_are_reported() {
    let blank: Task = serde_json::from_value(serde_json::json!({
        "id": " ",
        "course_label": "Algorithms",
        "title": "Nameless",
        "due": "2026-02-10T00:00:00Z",
        "synced_at": "2026-02-08T00:00:00Z"
    }))
    .expect("deserialise task");
    let unresolved = Task::new(
        TaskId::new("x").expect("valid task id"),
        "Algorithms",
        "Someday",
        DueInstant::Unresolved("soon".to_owned()),
        reference_now(),
    );

    let outcome = reconcile(vec![blank, unresolved, task("ok")], &[]);

    assert_eq!(ids(outcome.accepted()), vec!["ok"]);
    let reasons: Vec<_> = outcome.rejected().iter().map(|r| r.reason.clone()).collect();
    assert_eq!(
        reasons,
        vec![
            RejectionReason::BlankId,
            RejectionReason::UnresolvableDueTime("soon".to_owned())
        ]
    );
    assert_eq!(
        outcome.rejected().get(1).map(|r| r.id.as_str()),
        Some("x")
    );
}

#[rstest]
fn repeated_identifier_within_batch_is_kept_once() {
    let outcome = reconcile(vec![task("1"), task("2"), task("1")], &[]);

    assert_eq!(ids(outcome.accepted()), vec!["1", "2"]);
    assert_eq!(outcome.duplicates().len(), 1);
}

#[rstest]
#[case(vec![], vec![])]
#[case(vec!["1"], vec!["1", "2", "3"])]
#[case(vec!["9"], vec!["3", "1", "3"])]
fn reconciling_output_against_merged_set_is_empty(
    #[case] known_ids: Vec<&str>,
    #[case] incoming_ids: Vec<&str>,
) {
    let known: Vec<Task> = known_ids.into_iter().map(task).collect();
    let incoming: Vec<Task> = incoming_ids.into_iter().map(task).collect();

    let first = reconcile(incoming, &known).into_accepted();
    let mut merged = known;
    merged.extend(first.iter().cloned());
    let second = reconcile(first, &merged);

    assert!(second.accepted().is_empty());
}

#[rstest]
fn reconcile_is_repeatable_for_same_inputs() {
    let known = vec![task("1")];
    let incoming = vec![task("1"), task("2"), task("3")];

    let first = reconcile(incoming.clone(), &known);
    let second = reconcile(incoming, &known);

    assert_eq!(first, second);
}

#[rstest]
fn tasks_from_other_rooms_are_split_off_in_order() {
    let home = RoomName::new("home").expect("valid room");
    let away = RoomName::new("away").expect("valid room");
    let incoming = vec![
        task("1"),
        task("2").with_room(away.clone()),
        task("3").with_room(home.clone()),
    ];

    let (local, foreign) = split_foreign(incoming, &home);

    assert_eq!(ids(&local), vec!["1", "3"]);
    let reasons: Vec<_> = foreign.iter().map(|rejection| &rejection.reason).collect();
    assert_eq!(reasons, vec![&RejectionReason::ForeignRoom(away)]);
}
