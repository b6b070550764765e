//! Service layer for booking appointments and driving their lifecycle.

use super::AppointmentServiceConfig;
use crate::appointment::{
    domain::{
        AppointmentDetails, AppointmentDomainError, AppointmentId, AppointmentLifecycle,
        AppointmentRecord, AppointmentTransition, AppointmentTransitionError, TransitionResult,
    },
    ports::{AppointmentRepository, AppointmentRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for booking a new appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookAppointmentRequest {
    id: Option<String>,
    client: String,
    service: String,
    display_time: String,
    professional: String,
    scheduled_at: DateTime<Utc>,
}

impl BookAppointmentRequest {
    /// Creates a request with the required booking fields.
    ///
    /// A random identifier is generated at booking time unless
    /// [`Self::with_id`] supplies one.
    #[must_use]
    pub fn new(
        client: impl Into<String>,
        service: impl Into<String>,
        display_time: impl Into<String>,
        professional: impl Into<String>,
        scheduled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            client: client.into(),
            service: service.into(),
            display_time: display_time.into(),
            professional: professional.into(),
            scheduled_at,
        }
    }

    /// Sets a caller-chosen appointment identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Caller intent for one lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentCommand {
    /// See [`AppointmentLifecycle::start_confirmation_process`].
    StartConfirmationProcess,
    /// See [`AppointmentLifecycle::confirm_by_client`].
    ConfirmByClient,
    /// See [`AppointmentLifecycle::cancel_due_to_timeout`].
    CancelDueToTimeout,
    /// See [`AppointmentLifecycle::confirm_automatically`].
    ConfirmAutomatically,
    /// See [`AppointmentLifecycle::cancel_by_client`].
    CancelByClient,
    /// See [`AppointmentLifecycle::start_service`].
    StartService,
    /// See [`AppointmentLifecycle::request_reschedule_with`].
    RequestReschedule {
        /// Requested new scheduled instant.
        new_scheduled_at: DateTime<Utc>,
    },
    /// See [`AppointmentLifecycle::cancel_with_advance_notice`].
    CancelWithAdvanceNotice,
    /// See [`AppointmentLifecycle::mark_as_no_show`].
    MarkAsNoShow,
    /// See [`AppointmentLifecycle::complete_service`].
    CompleteService,
    /// See [`AppointmentLifecycle::cancel_during_execution`].
    CancelDuringExecution,
    /// See [`AppointmentLifecycle::confirm_rescheduled_time`].
    ConfirmRescheduledTime,
}

impl AppointmentCommand {
    /// Returns the transition this command attempts.
    #[must_use]
    pub const fn transition(self) -> AppointmentTransition {
        match self {
            Self::StartConfirmationProcess => AppointmentTransition::StartConfirmationProcess,
            Self::ConfirmByClient => AppointmentTransition::ConfirmByClient,
            Self::CancelDueToTimeout => AppointmentTransition::CancelDueToTimeout,
            Self::ConfirmAutomatically => AppointmentTransition::ConfirmAutomatically,
            Self::CancelByClient => AppointmentTransition::CancelByClient,
            Self::StartService => AppointmentTransition::StartService,
            Self::RequestReschedule { .. } => AppointmentTransition::RequestReschedule,
            Self::CancelWithAdvanceNotice => AppointmentTransition::CancelWithAdvanceNotice,
            Self::MarkAsNoShow => AppointmentTransition::MarkAsNoShow,
            Self::CompleteService => AppointmentTransition::CompleteService,
            Self::CancelDuringExecution => AppointmentTransition::CancelDuringExecution,
            Self::ConfirmRescheduledTime => AppointmentTransition::ConfirmRescheduledTime,
        }
    }
}

/// Service-level errors for appointment lifecycle operations.
#[derive(Debug, Error)]
pub enum AppointmentServiceError {
    /// Booking input failed validation.
    #[error(transparent)]
    Domain(#[from] AppointmentDomainError),
    /// The lifecycle rejected the requested transition.
    #[error(transparent)]
    Transition(#[from] AppointmentTransitionError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] AppointmentRepositoryError),
    /// No appointment exists with the given identifier.
    #[error("appointment not found: {0}")]
    NotFound(AppointmentId),
}

/// Result type for appointment service operations.
pub type AppointmentServiceResult<T> = Result<T, AppointmentServiceError>;

type AppointmentLocks = HashMap<AppointmentId, Arc<tokio::sync::Mutex<()>>>;

/// Appointment lifecycle orchestration service.
///
/// Commands against the same appointment run one at a time: loading the
/// record, applying the transition and persisting it happen under a lock
/// held per appointment identifier.
pub struct AppointmentLifecycleService<R, C>
where
    R: AppointmentRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    config: AppointmentServiceConfig,
    locks: Arc<Mutex<AppointmentLocks>>,
}

impl<R, C> Clone for AppointmentLifecycleService<R, C>
where
    R: AppointmentRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            config: self.config,
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<R, C> AppointmentLifecycleService<R, C>
where
    R: AppointmentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default configuration.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_config(repository, clock, AppointmentServiceConfig::default())
    }

    /// Creates a service with an explicit configuration.
    #[must_use]
    pub fn with_config(
        repository: Arc<R>,
        clock: Arc<C>,
        config: AppointmentServiceConfig,
    ) -> Self {
        Self {
            repository,
            clock,
            config,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &AppointmentServiceConfig {
        &self.config
    }

    /// Books a new appointment in the pending state.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentServiceError::Domain`] when the supplied
    /// identifier is blank, or [`AppointmentServiceError::Repository`] when
    /// the repository rejects persistence.
    pub async fn book(
        &self,
        request: BookAppointmentRequest,
    ) -> AppointmentServiceResult<AppointmentRecord> {
        let id = request
            .id
            .map_or_else(|| Ok(AppointmentId::generate()), AppointmentId::new)?;
        let details = AppointmentDetails::new(
            id,
            request.client,
            request.service,
            request.display_time,
            request.professional,
        );
        let lifecycle = AppointmentLifecycle::new(details, request.scheduled_at, &*self.clock);
        self.repository.store(lifecycle.record()).await?;

        let record = lifecycle.into_record();
        info!(
            appointment_id = %record.id(),
            scheduled_at = %record.scheduled_at(),
            "appointment booked"
        );
        Ok(record)
    }

    /// Retrieves an appointment by identifier.
    ///
    /// Returns `Ok(None)` when no appointment has the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(
        &self,
        id: &AppointmentId,
    ) -> AppointmentServiceResult<Option<AppointmentRecord>> {
        debug!(appointment_id = %id, "looking up appointment");
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists every appointment ordered by scheduled instant.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list(&self) -> AppointmentServiceResult<Vec<AppointmentRecord>> {
        Ok(self.repository.list().await?)
    }

    /// Returns the transitions that may be attempted on an appointment.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentServiceError::NotFound`] when the appointment does
    /// not exist, or [`AppointmentServiceError::Repository`] when lookup fails.
    pub async fn available_transitions(
        &self,
        id: &AppointmentId,
    ) -> AppointmentServiceResult<Vec<AppointmentTransition>> {
        let lifecycle = self.load(id).await?;
        Ok(lifecycle.available_transitions())
    }

    /// Applies a command to a stored appointment and persists the outcome.
    ///
    /// Rejected commands leave the stored record untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentServiceError::NotFound`] when the appointment does
    /// not exist, [`AppointmentServiceError::Transition`] when the lifecycle
    /// rejects the command, or [`AppointmentServiceError::Repository`] when
    /// persistence fails.
    pub async fn execute(
        &self,
        id: &AppointmentId,
        command: AppointmentCommand,
    ) -> AppointmentServiceResult<AppointmentRecord> {
        let appointment_lock = self.lock_for(id);
        let outcome = {
            let _serialized = appointment_lock.lock().await;
            self.execute_serialized(id, command).await
        };
        self.release_lock(id, &appointment_lock);
        outcome
    }

    async fn execute_serialized(
        &self,
        id: &AppointmentId,
        command: AppointmentCommand,
    ) -> AppointmentServiceResult<AppointmentRecord> {
        let mut lifecycle = self.load(id).await?;
        let from = lifecycle.current_state();
        let transition = command.transition();

        match self.apply(&mut lifecycle, command) {
            Ok(to) => {
                self.repository.update(lifecycle.record()).await?;
                info!(
                    appointment_id = %id,
                    %transition,
                    %from,
                    %to,
                    "appointment transition committed"
                );
                Ok(lifecycle.into_record())
            }
            Err(err) => {
                warn!(
                    appointment_id = %id,
                    %transition,
                    %from,
                    error = %err,
                    "appointment transition rejected"
                );
                Err(err.into())
            }
        }
    }

    fn apply(
        &self,
        lifecycle: &mut AppointmentLifecycle,
        command: AppointmentCommand,
    ) -> TransitionResult {
        match command {
            AppointmentCommand::StartConfirmationProcess => lifecycle.start_confirmation_process(),
            AppointmentCommand::ConfirmByClient => lifecycle.confirm_by_client(),
            AppointmentCommand::CancelDueToTimeout => lifecycle.cancel_due_to_timeout(),
            AppointmentCommand::ConfirmAutomatically => lifecycle.confirm_automatically(),
            AppointmentCommand::CancelByClient => lifecycle.cancel_by_client(),
            AppointmentCommand::StartService => lifecycle.start_service(&*self.clock),
            AppointmentCommand::RequestReschedule { new_scheduled_at } => lifecycle
                .request_reschedule_with(
                    new_scheduled_at,
                    self.config.reschedule_policy,
                    &*self.clock,
                ),
            AppointmentCommand::CancelWithAdvanceNotice => lifecycle.cancel_with_advance_notice(),
            AppointmentCommand::MarkAsNoShow => lifecycle.mark_as_no_show(),
            AppointmentCommand::CompleteService => lifecycle.complete_service(),
            AppointmentCommand::CancelDuringExecution => lifecycle.cancel_during_execution(),
            AppointmentCommand::ConfirmRescheduledTime => lifecycle.confirm_rescheduled_time(),
        }
    }

    async fn load(&self, id: &AppointmentId) -> AppointmentServiceResult<AppointmentLifecycle> {
        let record = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppointmentServiceError::NotFound(id.clone()))?;
        Ok(AppointmentLifecycle::resume(record))
    }

    fn lock_for(&self, id: &AppointmentId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(id.clone()).or_default())
    }

    /// Drops the map entry once no other command holds or awaits it.
    fn release_lock(&self, id: &AppointmentId, appointment_lock: &Arc<tokio::sync::Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the map plus the one held here.
        if Arc::strong_count(appointment_lock) == 2 {
            locks.remove(id);
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked_locks(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
