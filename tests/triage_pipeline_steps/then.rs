//! Then steps for room deadline triage BDD scenarios.

use super::world::TriageWorld;
use rstest_bdd_macros::then;
use taskmate::task::ports::TaskStoreError;
use taskmate::triage::{UrgencyClass, services::TriageError};

fn parse_urgency(name: &str) -> Result<UrgencyClass, eyre::Report> {
    [
        UrgencyClass::Critical,
        UrgencyClass::Upcoming,
        UrgencyClass::Planned,
        UrgencyClass::Finished,
        UrgencyClass::Unknown,
    ]
    .into_iter()
    .find(|urgency| urgency.as_str() == name)
    .ok_or_else(|| eyre::eyre!("unknown urgency band in scenario: {name}"))
}

#[then("{count:usize} tasks are accepted")]
fn tasks_accepted(world: &TriageWorld, count: usize) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing intake report"))?;
    if report.accepted.len() != count {
        return Err(eyre::eyre!(
            "expected {count} accepted tasks, found {:?}",
            report.accepted
        ));
    }
    Ok(())
}

#[then("{count:usize} duplicates are reported")]
fn duplicates_reported(world: &TriageWorld, count: usize) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing intake report"))?;
    if report.duplicates.len() != count {
        return Err(eyre::eyre!(
            "expected {count} duplicates, found {:?}",
            report.duplicates
        ));
    }
    Ok(())
}

#[then(r#"the ranked task ids are "{ids}""#)]
fn ranked_ids(world: &TriageWorld, ids: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = ids.split(',').map(str::trim).collect();
    let actual: Vec<&str> = world
        .view()?
        .tasks
        .iter()
        .map(|entry| entry.task().id().as_str())
        .collect();
    if actual != expected {
        return Err(eyre::eyre!("expected order {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then(r#"{count:usize} tasks are classified "{urgency}""#)]
fn tasks_classified(world: &TriageWorld, count: usize, urgency: String) -> Result<(), eyre::Report> {
    let band = parse_urgency(&urgency)?;
    let actual = world.view()?.count(band);
    if actual != count {
        return Err(eyre::eyre!("expected {count} {band} tasks, found {actual}"));
    }
    Ok(())
}

#[then(r#"the first task is labelled "{label}""#)]
fn first_task_label(world: &TriageWorld, label: String) -> Result<(), eyre::Report> {
    let first = world
        .view()?
        .tasks
        .first()
        .ok_or_else(|| eyre::eyre!("triage view is empty"))?;
    if first.remaining_label() != label {
        return Err(eyre::eyre!(
            "expected label {label:?}, found {:?}",
            first.remaining_label()
        ));
    }
    Ok(())
}

#[then("triage fails because the source is unavailable")]
fn triage_unavailable(world: &TriageWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_triage
        .as_ref()
        .ok_or_else(|| eyre::eyre!("room has not been triaged"))?;
    if !matches!(
        result,
        Err(TriageError::Store(TaskStoreError::Unavailable(_)))
    ) {
        return Err(eyre::eyre!("expected unavailable source error, got {result:?}"));
    }
    Ok(())
}
