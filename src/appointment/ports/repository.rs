//! Repository port for appointment persistence and lookup.

use crate::appointment::domain::{AppointmentId, AppointmentRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for appointment repository operations.
pub type AppointmentRepositoryResult<T> = Result<T, AppointmentRepositoryError>;

/// Appointment persistence contract.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Stores a newly booked appointment.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentRepositoryError::DuplicateAppointment`] when the
    /// identifier already exists.
    async fn store(&self, record: &AppointmentRecord) -> AppointmentRepositoryResult<()>;

    /// Persists the state and scheduled instant of an existing appointment.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentRepositoryError::NotFound`] when the appointment
    /// does not exist.
    async fn update(&self, record: &AppointmentRecord) -> AppointmentRepositoryResult<()>;

    /// Finds an appointment by identifier.
    ///
    /// Returns `None` when the appointment does not exist.
    async fn find_by_id(
        &self,
        id: &AppointmentId,
    ) -> AppointmentRepositoryResult<Option<AppointmentRecord>>;

    /// Returns every stored appointment ordered by scheduled instant, then
    /// identifier.
    async fn list(&self) -> AppointmentRepositoryResult<Vec<AppointmentRecord>>;
}

/// Errors returned by appointment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AppointmentRepositoryError {
    /// An appointment with the same identifier already exists.
    #[error("duplicate appointment identifier: {0}")]
    DuplicateAppointment(AppointmentId),

    /// The appointment was not found.
    #[error("appointment not found: {0}")]
    NotFound(AppointmentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AppointmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
