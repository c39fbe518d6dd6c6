//! Given steps for room deadline triage BDD scenarios.

use super::world::{TriageWorld, run_async};
use chrono::DateTime;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskmate::task::domain::RoomName;

#[given(r#"the current time is "{instant}""#)]
fn current_time(world: &mut TriageWorld, instant: String) -> Result<(), eyre::Report> {
    let parsed = DateTime::parse_from_rfc3339(&instant)
        .wrap_err("parse scenario instant")?
        .to_utc();
    world.clock.set(parsed);
    Ok(())
}

#[given(r#"an empty study room "{room}""#)]
fn empty_room(world: &mut TriageWorld, room: String) -> Result<(), eyre::Report> {
    world.room = Some(RoomName::new(room).wrap_err("build scenario room")?);
    Ok(())
}

#[given("the room has been seeded with the simulation")]
fn room_seeded(world: &mut TriageWorld) -> Result<(), eyre::Report> {
    let room = world.room()?.clone();
    let report = run_async(world.service.seed_simulation(&room)).wrap_err("seed scenario room")?;
    world.last_report = Some(report);
    Ok(())
}

#[given("the task source is unreachable")]
fn source_unreachable(world: &mut TriageWorld) {
    world.store.set_available(false);
}
