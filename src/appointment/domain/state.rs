//! Appointment lifecycle states.

use super::ParseAppointmentStateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Appointment lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentState {
    /// Appointment has been booked and awaits a confirmation route.
    Pending,
    /// The client has been asked to confirm.
    AwaitingConfirmation,
    /// Appointment is confirmed for its scheduled slot.
    Confirmed,
    /// Service is being delivered.
    InProgress,
    /// Service has been delivered.
    Completed,
    /// Appointment has been cancelled.
    Cancelled,
    /// A new slot has been requested and awaits confirmation.
    Rescheduled,
    /// The client did not attend.
    NoShow,
}

impl AppointmentState {
    /// Every state, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Pending,
        Self::AwaitingConfirmation,
        Self::Confirmed,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
        Self::Rescheduled,
        Self::NoShow,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::AwaitingConfirmation => "awaiting_confirmation",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Rescheduled => "rescheduled",
            Self::NoShow => "no_show",
        }
    }

    /// Returns whether no transition leaves this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }
}

impl fmt::Display for AppointmentState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AppointmentState {
    type Error = ParseAppointmentStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "awaiting_confirmation" => Ok(Self::AwaitingConfirmation),
            "confirmed" => Ok(Self::Confirmed),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "rescheduled" => Ok(Self::Rescheduled),
            "no_show" => Ok(Self::NoShow),
            _ => Err(ParseAppointmentStateError(value.to_owned())),
        }
    }
}
