//! When steps for appointment lifecycle BDD scenarios.

use super::world::{AppointmentWorld, command_named};
use crate::test_helpers::instant;
use bookwright::appointment::services::AppointmentCommand;
use rstest_bdd_macros::when;

#[when(r#"the "{command}" command is applied"#)]
fn command_is_applied(world: &mut AppointmentWorld, command: String) -> Result<(), eyre::Report> {
    world.apply(command_named(&command)?)
}

#[when(r#"the appointment is rescheduled to "{timestamp}""#)]
fn appointment_is_rescheduled(
    world: &mut AppointmentWorld,
    timestamp: String,
) -> Result<(), eyre::Report> {
    world.apply(AppointmentCommand::RequestReschedule {
        new_scheduled_at: instant(&timestamp)?,
    })
}

#[when(r#"the clock advances to "{timestamp}""#)]
fn clock_advances(world: &mut AppointmentWorld, timestamp: String) -> Result<(), eyre::Report> {
    world.clock.set(instant(&timestamp)?);
    Ok(())
}
