//! In-memory repository for appointment records.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::appointment::{
    domain::{AppointmentId, AppointmentRecord},
    ports::{AppointmentRepository, AppointmentRepositoryError, AppointmentRepositoryResult},
};

/// Thread-safe in-memory appointment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAppointmentRepository {
    state: Arc<RwLock<HashMap<AppointmentId, AppointmentRecord>>>,
}

impl InMemoryAppointmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error<T>(err: &PoisonError<T>) -> AppointmentRepositoryError {
    AppointmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn store(&self, record: &AppointmentRecord) -> AppointmentRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        if state.contains_key(record.id()) {
            return Err(AppointmentRepositoryError::DuplicateAppointment(
                record.id().clone(),
            ));
        }
        state.insert(record.id().clone(), record.clone());
        Ok(())
    }

    async fn update(&self, record: &AppointmentRecord) -> AppointmentRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let stored = state
            .get_mut(record.id())
            .ok_or_else(|| AppointmentRepositoryError::NotFound(record.id().clone()))?;
        *stored = record.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &AppointmentId,
    ) -> AppointmentRepositoryResult<Option<AppointmentRecord>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.get(id).cloned())
    }

    async fn list(&self) -> AppointmentRepositoryResult<Vec<AppointmentRecord>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        let mut records: Vec<AppointmentRecord> = state.values().cloned().collect();
        records.sort_by(|left, right| {
            left.scheduled_at()
                .cmp(&right.scheduled_at())
                .then_with(|| left.id().cmp(right.id()))
        });
        Ok(records)
    }
}
