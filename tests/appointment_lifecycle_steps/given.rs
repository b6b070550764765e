//! Given steps for appointment lifecycle BDD scenarios.

use super::world::{AppointmentWorld, run_async};
use crate::test_helpers::instant;
use bookwright::appointment::services::BookAppointmentRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"the clock reads "{timestamp}""#)]
fn clock_reads(world: &mut AppointmentWorld, timestamp: String) -> Result<(), eyre::Report> {
    world.clock.set(instant(&timestamp)?);
    Ok(())
}

#[given(r#"an appointment "{id}" scheduled for "{timestamp}""#)]
fn appointment_scheduled(
    world: &mut AppointmentWorld,
    id: String,
    timestamp: String,
) -> Result<(), eyre::Report> {
    let scheduled_at = instant(&timestamp)?;
    let request =
        BookAppointmentRequest::new("Maria Silva", "Haircut", "09:30", "Andre", scheduled_at)
            .with_id(id);
    let booked = run_async(world.service.book(request)).wrap_err("book scenario appointment")?;
    world.appointment = Some(booked);
    Ok(())
}
