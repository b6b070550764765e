//! Identifier and descriptive value types for the appointment domain.

use super::AppointmentDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a bookable appointment.
///
/// Identifiers are supplied by the booking caller and are kept verbatim apart
/// from surrounding whitespace. [`AppointmentId::generate`] provides a random
/// identifier when the caller has none.
///
/// # Examples
///
/// ```
/// use bookwright::appointment::domain::AppointmentId;
///
/// let id = AppointmentId::new(" 42 ").expect("non-empty identifier");
/// assert_eq!(id.as_str(), "42");
/// assert!(AppointmentId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(String);

impl AppointmentId {
    /// Creates a validated appointment identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentDomainError::EmptyAppointmentId`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, AppointmentDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(AppointmentDomainError::EmptyAppointmentId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Creates a random identifier backed by a v4 UUID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AppointmentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive fields supplied when an appointment is booked.
///
/// None of these fields take part in transition decisions; they are carried
/// for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDetails {
    /// Appointment identifier.
    pub id: AppointmentId,
    /// Client display name.
    pub client: String,
    /// Booked service display name.
    pub service: String,
    /// Human-facing time label, such as `09:30`.
    pub display_time: String,
    /// Professional display name.
    pub professional: String,
}

impl AppointmentDetails {
    /// Creates appointment details from display values.
    #[must_use]
    pub fn new(
        id: AppointmentId,
        client: impl Into<String>,
        service: impl Into<String>,
        display_time: impl Into<String>,
        professional: impl Into<String>,
    ) -> Self {
        Self {
            id,
            client: client.into(),
            service: service.into(),
            display_time: display_time.into(),
            professional: professional.into(),
        }
    }
}
