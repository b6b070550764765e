//! Then steps for appointment lifecycle BDD scenarios.

use super::world::{AppointmentWorld, command_for};
use crate::test_helpers::instant;
use bookwright::appointment::{
    domain::{AppointmentState, AppointmentTransition, AppointmentTransitionError},
    services::AppointmentServiceError,
};
use rstest_bdd_macros::then;

#[then(r#"the appointment state is "{state}""#)]
fn appointment_state_is(world: &AppointmentWorld, state: String) -> Result<(), eyre::Report> {
    let expected_state = AppointmentState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid expected state in scenario: {err}"))?;
    let actual_state = world.appointment()?.state();

    if actual_state != expected_state {
        return Err(eyre::eyre!(
            "expected state {expected_state}, found {actual_state}"
        ));
    }
    Ok(())
}

#[then(r#"the appointment is scheduled for "{timestamp}""#)]
fn appointment_is_scheduled_for(
    world: &AppointmentWorld,
    timestamp: String,
) -> Result<(), eyre::Report> {
    let expected = instant(&timestamp)?;
    let actual = world.appointment()?.scheduled_at();
    eyre::ensure!(actual == expected, "expected slot {expected}, found {actual}");
    Ok(())
}

#[then("the appointment is terminal")]
fn appointment_is_terminal(world: &AppointmentWorld) -> Result<(), eyre::Report> {
    let state = world.appointment()?.state();
    eyre::ensure!(state.is_terminal(), "state {state} is not terminal");
    Ok(())
}

#[then("the appointment is not terminal")]
fn appointment_is_not_terminal(world: &AppointmentWorld) -> Result<(), eyre::Report> {
    let state = world.appointment()?.state();
    eyre::ensure!(!state.is_terminal(), "state {state} is terminal");
    Ok(())
}

#[then("the command fails with an invalid transition error")]
fn command_fails_with_invalid_transition(world: &AppointmentWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing command result"))?;

    if !matches!(
        result,
        Err(AppointmentServiceError::Transition(
            AppointmentTransitionError::InvalidTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the command fails with a guard error")]
fn command_fails_with_guard_error(world: &AppointmentWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing command result"))?;

    if !matches!(
        result,
        Err(AppointmentServiceError::Transition(
            AppointmentTransitionError::GuardNotSatisfied(_)
        ))
    ) {
        return Err(eyre::eyre!(
            "expected GuardNotSatisfied error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("every command is rejected with an invalid transition error")]
fn every_command_is_rejected(world: &mut AppointmentWorld) -> Result<(), eyre::Report> {
    let state = world.appointment()?.state();
    for transition in AppointmentTransition::ALL {
        world.apply(command_for(transition)?)?;
        let result = world
            .last_result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing command result"))?;
        let rejected_here = matches!(
            result,
            Err(AppointmentServiceError::Transition(
                AppointmentTransitionError::InvalidTransition { transition: attempted, state: seen }
            )) if *attempted == transition && *seen == state
        );
        eyre::ensure!(rejected_here, "{transition} was not rejected: {result:?}");
    }
    Ok(())
}
