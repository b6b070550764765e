//! Error types for appointment construction, parsing, and transitions.

use super::{AppointmentState, AppointmentTransition};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing appointment domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppointmentDomainError {
    /// The appointment identifier is empty after trimming.
    #[error("appointment identifier must not be empty")]
    EmptyAppointmentId,
}

/// Secondary condition that rejected an otherwise legal transition.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GuardFailure {
    /// Service cannot start before the booked slot.
    #[error("scheduled time {scheduled_at} has not been reached (now {now})")]
    ScheduledTimeNotReached {
        /// Instant the appointment is booked for.
        scheduled_at: DateTime<Utc>,
        /// Clock reading when the guard was evaluated.
        now: DateTime<Utc>,
    },

    /// The strict reschedule policy requires a slot in the future.
    #[error("requested slot {requested} is not after the current time {now}")]
    RescheduleNotInFuture {
        /// Requested new scheduled instant.
        requested: DateTime<Utc>,
        /// Clock reading when the guard was evaluated.
        now: DateTime<Utc>,
    },
}

/// Rejection of a lifecycle transition. The record is never modified when
/// one of these is returned.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AppointmentTransitionError {
    /// The current state is not the transition's source state.
    #[error("cannot {transition} from state {state}")]
    InvalidTransition {
        /// Attempted transition.
        transition: AppointmentTransition,
        /// Actual state at the time of the attempt.
        state: AppointmentState,
    },

    /// The source state matched but a guard condition failed.
    #[error("transition guard not satisfied: {0}")]
    GuardNotSatisfied(GuardFailure),
}

/// Error returned while parsing appointment states from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown appointment state: {0}")]
pub struct ParseAppointmentStateError(pub String);
