//! Named lifecycle transitions and the appointment transition table.

use super::AppointmentState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named appointment lifecycle transition.
///
/// Each transition has exactly one source state and one target state. The
/// legality of a transition depends only on the current state; guards are
/// evaluated separately by [`super::AppointmentLifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentTransition {
    /// Ask the client to confirm a pending appointment.
    StartConfirmationProcess,
    /// The client confirmed.
    ConfirmByClient,
    /// The confirmation window elapsed without an answer.
    CancelDueToTimeout,
    /// Confirm a pending appointment without asking the client.
    ConfirmAutomatically,
    /// The client cancelled before confirmation started.
    CancelByClient,
    /// Begin delivering the service. Guarded by the scheduled time.
    StartService,
    /// Move a confirmed appointment to a new slot.
    RequestReschedule,
    /// Cancel a confirmed appointment ahead of time.
    CancelWithAdvanceNotice,
    /// The client did not attend a confirmed appointment.
    MarkAsNoShow,
    /// Finish delivering the service.
    CompleteService,
    /// Abort the service while it is being delivered.
    CancelDuringExecution,
    /// Accept the rescheduled slot.
    ConfirmRescheduledTime,
}

impl AppointmentTransition {
    /// Every transition, in table order.
    pub const ALL: [Self; 12] = [
        Self::StartConfirmationProcess,
        Self::ConfirmByClient,
        Self::CancelDueToTimeout,
        Self::ConfirmAutomatically,
        Self::CancelByClient,
        Self::StartService,
        Self::RequestReschedule,
        Self::CancelWithAdvanceNotice,
        Self::MarkAsNoShow,
        Self::CompleteService,
        Self::CancelDuringExecution,
        Self::ConfirmRescheduledTime,
    ];

    /// Returns the canonical name of the transition.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartConfirmationProcess => "start_confirmation_process",
            Self::ConfirmByClient => "confirm_by_client",
            Self::CancelDueToTimeout => "cancel_due_to_timeout",
            Self::ConfirmAutomatically => "confirm_automatically",
            Self::CancelByClient => "cancel_by_client",
            Self::StartService => "start_service",
            Self::RequestReschedule => "request_reschedule",
            Self::CancelWithAdvanceNotice => "cancel_with_advance_notice",
            Self::MarkAsNoShow => "mark_as_no_show",
            Self::CompleteService => "complete_service",
            Self::CancelDuringExecution => "cancel_during_execution",
            Self::ConfirmRescheduledTime => "confirm_rescheduled_time",
        }
    }

    /// Returns the `(source, target)` edge for this transition.
    #[must_use]
    pub const fn edge(self) -> (AppointmentState, AppointmentState) {
        use AppointmentState as S;
        match self {
            Self::StartConfirmationProcess => (S::Pending, S::AwaitingConfirmation),
            Self::ConfirmByClient => (S::AwaitingConfirmation, S::Confirmed),
            Self::CancelDueToTimeout => (S::AwaitingConfirmation, S::Cancelled),
            Self::ConfirmAutomatically => (S::Pending, S::Confirmed),
            Self::CancelByClient => (S::Pending, S::Cancelled),
            Self::StartService => (S::Confirmed, S::InProgress),
            Self::RequestReschedule => (S::Confirmed, S::Rescheduled),
            Self::CancelWithAdvanceNotice => (S::Confirmed, S::Cancelled),
            Self::MarkAsNoShow => (S::Confirmed, S::NoShow),
            Self::CompleteService => (S::InProgress, S::Completed),
            Self::CancelDuringExecution => (S::InProgress, S::Cancelled),
            Self::ConfirmRescheduledTime => (S::Rescheduled, S::Confirmed),
        }
    }

    /// Returns the state the transition must start from.
    #[must_use]
    pub const fn source_state(self) -> AppointmentState {
        self.edge().0
    }

    /// Returns the state the transition commits.
    #[must_use]
    pub const fn target_state(self) -> AppointmentState {
        self.edge().1
    }

    /// Returns whether the transition may be attempted from `state`.
    #[must_use]
    pub fn is_allowed_from(self, state: AppointmentState) -> bool {
        self.source_state() == state
    }

    /// Returns the transitions leaving `state`, in table order.
    ///
    /// Terminal states yield an empty list.
    #[must_use]
    pub fn available_from(state: AppointmentState) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|transition| transition.is_allowed_from(state))
            .collect()
    }
}

impl fmt::Display for AppointmentTransition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
