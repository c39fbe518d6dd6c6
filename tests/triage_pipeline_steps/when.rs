//! When steps for room deadline triage BDD scenarios.

use super::world::{TriageWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the room is seeded with the simulation again")]
fn seed_again(world: &mut TriageWorld) -> Result<(), eyre::Report> {
    let room = world.room()?.clone();
    let report = run_async(world.service.seed_simulation(&room)).wrap_err("reseed scenario room")?;
    world.last_report = Some(report);
    Ok(())
}

#[when(r#"the announcement "{text}" is scanned for "{course}""#)]
fn scan_announcement(
    world: &mut TriageWorld,
    text: String,
    course: String,
) -> Result<(), eyre::Report> {
    let room = world.room()?.clone();
    let report = run_async(world.service.ingest_text(&room, &text, &course))
        .wrap_err("scan scenario announcement")?;
    world.last_report = Some(report);
    Ok(())
}

#[when("the room is triaged")]
fn triage_room(world: &mut TriageWorld) -> Result<(), eyre::Report> {
    let room = world.room()?.clone();
    world.last_triage = Some(run_async(world.service.triage(&room)));
    Ok(())
}
