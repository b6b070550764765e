//! Shared fixtures for appointment unit tests.

use crate::appointment::domain::{
    AppointmentDetails, AppointmentId, AppointmentLifecycle, AppointmentState,
    AppointmentTransition, PersistedAppointmentData, TransitionResult,
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use std::sync::{Mutex, PoisonError};

/// Clock whose reading only changes when a test moves it.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at `now`.
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let next = self.utc() + by;
        self.set(next);
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The booked slot used across tests: 2025-05-05 09:30 UTC.
pub fn slot() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 5, 9, 30, 0)
        .single()
        .expect("valid slot timestamp")
}

/// One day before [`slot`], when appointments are booked.
pub fn booking_time() -> DateTime<Utc> {
    slot() - Duration::days(1)
}

pub fn details(id: &str) -> AppointmentDetails {
    AppointmentDetails::new(
        AppointmentId::new(id).expect("valid appointment id"),
        "Maria Silva",
        "Haircut",
        "09:30",
        "Andre",
    )
}

#[fixture]
pub fn clock() -> ManualClock {
    ManualClock::at(booking_time())
}

#[fixture]
pub fn pending(clock: ManualClock) -> (AppointmentLifecycle, ManualClock) {
    let lifecycle = AppointmentLifecycle::new(details("appt-1"), slot(), &clock);
    (lifecycle, clock)
}

/// Builds a lifecycle already sitting in `state`.
pub fn lifecycle_in(state: AppointmentState) -> AppointmentLifecycle {
    AppointmentLifecycle::from_persisted(PersistedAppointmentData {
        details: details("appt-persisted"),
        scheduled_at: slot(),
        state,
        created_at: booking_time(),
    })
}

/// Invokes the lifecycle operation named by `transition`.
///
/// Reschedules move the slot forward by one day.
pub fn attempt(
    lifecycle: &mut AppointmentLifecycle,
    transition: AppointmentTransition,
    clock: &ManualClock,
) -> TransitionResult {
    match transition {
        AppointmentTransition::StartConfirmationProcess => lifecycle.start_confirmation_process(),
        AppointmentTransition::ConfirmByClient => lifecycle.confirm_by_client(),
        AppointmentTransition::CancelDueToTimeout => lifecycle.cancel_due_to_timeout(),
        AppointmentTransition::ConfirmAutomatically => lifecycle.confirm_automatically(),
        AppointmentTransition::CancelByClient => lifecycle.cancel_by_client(),
        AppointmentTransition::StartService => lifecycle.start_service(clock),
        AppointmentTransition::RequestReschedule => {
            lifecycle.request_reschedule(slot() + Duration::days(1))
        }
        AppointmentTransition::CancelWithAdvanceNotice => lifecycle.cancel_with_advance_notice(),
        AppointmentTransition::MarkAsNoShow => lifecycle.mark_as_no_show(),
        AppointmentTransition::CompleteService => lifecycle.complete_service(),
        AppointmentTransition::CancelDuringExecution => lifecycle.cancel_during_execution(),
        AppointmentTransition::ConfirmRescheduledTime => lifecycle.confirm_rescheduled_time(),
    }
}
