//! Appointment record and the lifecycle state machine that owns it.

use super::{
    AppointmentDetails, AppointmentId, AppointmentState, AppointmentTransition,
    AppointmentTransitionError, GuardFailure, ReschedulePolicy,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Result of a lifecycle transition: the newly committed state, or the
/// reason the record was left untouched.
pub type TransitionResult = Result<AppointmentState, AppointmentTransitionError>;

/// Appointment record managed by an [`AppointmentLifecycle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    id: AppointmentId,
    client: String,
    service: String,
    display_time: String,
    professional: String,
    scheduled_at: DateTime<Utc>,
    state: AppointmentState,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted appointment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAppointmentData {
    /// Persisted descriptive fields.
    pub details: AppointmentDetails,
    /// Persisted scheduled instant.
    pub scheduled_at: DateTime<Utc>,
    /// Persisted lifecycle state.
    pub state: AppointmentState,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl AppointmentRecord {
    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAppointmentData) -> Self {
        let AppointmentDetails {
            id,
            client,
            service,
            display_time,
            professional,
        } = data.details;
        Self {
            id,
            client,
            service,
            display_time,
            professional,
            scheduled_at: data.scheduled_at,
            state: data.state,
            created_at: data.created_at,
        }
    }

    /// Returns the appointment identifier.
    #[must_use]
    pub const fn id(&self) -> &AppointmentId {
        &self.id
    }

    /// Returns the client display name.
    #[must_use]
    pub fn client(&self) -> &str {
        &self.client
    }

    /// Returns the booked service display name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the human-facing time label.
    #[must_use]
    pub fn display_time(&self) -> &str {
        &self.display_time
    }

    /// Returns the professional display name.
    #[must_use]
    pub fn professional(&self) -> &str {
        &self.professional
    }

    /// Returns the instant the appointment is booked for.
    #[must_use]
    pub const fn scheduled_at(&self) -> DateTime<Utc> {
        self.scheduled_at
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> AppointmentState {
        self.state
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// State machine gating every change to one appointment record.
///
/// All mutation goes through the named transition methods. A rejected
/// transition leaves the record exactly as it was.
///
/// # Examples
///
/// ```
/// use bookwright::appointment::domain::{
///     AppointmentDetails, AppointmentId, AppointmentLifecycle, AppointmentState,
/// };
/// use chrono::{Duration, Utc};
/// use mockable::DefaultClock;
///
/// let details = AppointmentDetails::new(
///     AppointmentId::new("1").expect("valid id"),
///     "Maria Silva",
///     "Haircut",
///     "09:30",
///     "Andre",
/// );
/// let mut lifecycle =
///     AppointmentLifecycle::new(details, Utc::now() - Duration::minutes(5), &DefaultClock);
///
/// assert_eq!(lifecycle.confirm_automatically(), Ok(AppointmentState::Confirmed));
/// assert_eq!(
///     lifecycle.start_service(&DefaultClock),
///     Ok(AppointmentState::InProgress)
/// );
/// assert!(lifecycle.cancel_by_client().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentLifecycle {
    record: AppointmentRecord,
}

impl AppointmentLifecycle {
    /// Books a new appointment in the [`AppointmentState::Pending`] state.
    #[must_use]
    pub fn new(
        details: AppointmentDetails,
        scheduled_at: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Self {
        let record = AppointmentRecord::from_persisted(PersistedAppointmentData {
            details,
            scheduled_at,
            state: AppointmentState::Pending,
            created_at: clock.utc(),
        });
        Self { record }
    }

    /// Resumes the lifecycle of a stored record in whatever state it holds.
    #[must_use]
    pub const fn resume(record: AppointmentRecord) -> Self {
        Self { record }
    }

    /// Reconstructs a lifecycle from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAppointmentData) -> Self {
        Self::resume(AppointmentRecord::from_persisted(data))
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn current_state(&self) -> AppointmentState {
        self.record.state
    }

    /// Returns a read view of the managed record.
    #[must_use]
    pub const fn record(&self) -> &AppointmentRecord {
        &self.record
    }

    /// Consumes the lifecycle and returns the managed record.
    #[must_use]
    pub fn into_record(self) -> AppointmentRecord {
        self.record
    }

    /// Returns whether the appointment has reached a final state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.record.state.is_terminal()
    }

    /// Returns the transitions that may be attempted from the current state.
    #[must_use]
    pub fn available_transitions(&self) -> Vec<AppointmentTransition> {
        AppointmentTransition::available_from(self.record.state)
    }

    /// `Pending` to `AwaitingConfirmation`.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentTransitionError::InvalidTransition`] unless the
    /// appointment is pending.
    pub fn start_confirmation_process(&mut self) -> TransitionResult {
        self.commit(AppointmentTransition::StartConfirmationProcess)
    }

    /// `AwaitingConfirmation` to `Confirmed`.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentTransitionError::InvalidTransition`] unless the
    /// appointment is awaiting confirmation.
    pub fn confirm_by_client(&mut self) -> TransitionResult {
        self.commit(AppointmentTransition::ConfirmByClient)
    }

    /// `AwaitingConfirmation` to `Cancelled`.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentTransitionError::InvalidTransition`] unless the
    /// appointment is awaiting confirmation.
    pub fn cancel_due_to_timeout(&mut self) -> TransitionResult {
        self.commit(AppointmentTransition::CancelDueToTimeout)
    }

    /// `Pending` to `Confirmed`.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentTransitionError::InvalidTransition`] unless the
    /// appointment is pending.
    pub fn confirm_automatically(&mut self) -> TransitionResult {
        self.commit(AppointmentTransition::ConfirmAutomatically)
    }

    /// `Pending` to `Cancelled`.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentTransitionError::InvalidTransition`] unless the
    /// appointment is pending.
    pub fn cancel_by_client(&mut self) -> TransitionResult {
        self.commit(AppointmentTransition::CancelByClient)
    }

    /// `Confirmed` to `InProgress`, once the scheduled time has arrived.
    ///
    /// The clock is read once; the guard passes when the reading is at or
    /// after the scheduled instant.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentTransitionError::InvalidTransition`] unless the
    /// appointment is confirmed, or
    /// [`AppointmentTransitionError::GuardNotSatisfied`] with
    /// [`GuardFailure::ScheduledTimeNotReached`] when called too early.
    pub fn start_service(&mut self, clock: &impl Clock) -> TransitionResult {
        let transition = AppointmentTransition::StartService;
        self.ensure_source(transition)?;

        let now = clock.utc();
        let scheduled_at = self.record.scheduled_at;
        if now < scheduled_at {
            return Err(AppointmentTransitionError::GuardNotSatisfied(
                GuardFailure::ScheduledTimeNotReached { scheduled_at, now },
            ));
        }

        Ok(self.write_state(transition))
    }

    /// `Confirmed` to `Rescheduled`, moving the appointment to `new_scheduled_at`.
    ///
    /// Any requested slot is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentTransitionError::InvalidTransition`] unless the
    /// appointment is confirmed.
    pub fn request_reschedule(&mut self, new_scheduled_at: DateTime<Utc>) -> TransitionResult {
        let transition = AppointmentTransition::RequestReschedule;
        self.ensure_source(transition)?;
        Ok(self.write_reschedule(new_scheduled_at))
    }

    /// `Confirmed` to `Rescheduled`, subject to a [`ReschedulePolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentTransitionError::InvalidTransition`] unless the
    /// appointment is confirmed, or
    /// [`AppointmentTransitionError::GuardNotSatisfied`] when the policy
    /// rejects the requested slot.
    pub fn request_reschedule_with(
        &mut self,
        new_scheduled_at: DateTime<Utc>,
        policy: ReschedulePolicy,
        clock: &impl Clock,
    ) -> TransitionResult {
        self.ensure_source(AppointmentTransition::RequestReschedule)?;
        policy
            .check(new_scheduled_at, clock.utc())
            .map_err(AppointmentTransitionError::GuardNotSatisfied)?;
        Ok(self.write_reschedule(new_scheduled_at))
    }

    /// `Confirmed` to `Cancelled`.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentTransitionError::InvalidTransition`] unless the
    /// appointment is confirmed.
    pub fn cancel_with_advance_notice(&mut self) -> TransitionResult {
        self.commit(AppointmentTransition::CancelWithAdvanceNotice)
    }

    /// `Confirmed` to `NoShow`.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentTransitionError::InvalidTransition`] unless the
    /// appointment is confirmed.
    pub fn mark_as_no_show(&mut self) -> TransitionResult {
        self.commit(AppointmentTransition::MarkAsNoShow)
    }

    /// `InProgress` to `Completed`.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentTransitionError::InvalidTransition`] unless the
    /// service is in progress.
    pub fn complete_service(&mut self) -> TransitionResult {
        self.commit(AppointmentTransition::CompleteService)
    }

    /// `InProgress` to `Cancelled`.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentTransitionError::InvalidTransition`] unless the
    /// service is in progress.
    pub fn cancel_during_execution(&mut self) -> TransitionResult {
        self.commit(AppointmentTransition::CancelDuringExecution)
    }

    /// `Rescheduled` to `Confirmed`. The scheduled instant is kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentTransitionError::InvalidTransition`] unless the
    /// appointment is rescheduled.
    pub fn confirm_rescheduled_time(&mut self) -> TransitionResult {
        self.commit(AppointmentTransition::ConfirmRescheduledTime)
    }

    fn commit(&mut self, transition: AppointmentTransition) -> TransitionResult {
        self.ensure_source(transition)?;
        Ok(self.write_state(transition))
    }

    fn ensure_source(
        &self,
        transition: AppointmentTransition,
    ) -> Result<(), AppointmentTransitionError> {
        if transition.is_allowed_from(self.record.state) {
            return Ok(());
        }

        Err(AppointmentTransitionError::InvalidTransition {
            transition,
            state: self.record.state,
        })
    }

    const fn write_state(&mut self, transition: AppointmentTransition) -> AppointmentState {
        let target = transition.target_state();
        self.record.state = target;
        target
    }

    const fn write_reschedule(&mut self, new_scheduled_at: DateTime<Utc>) -> AppointmentState {
        self.record.scheduled_at = new_scheduled_at;
        self.write_state(AppointmentTransition::RequestReschedule)
    }
}
