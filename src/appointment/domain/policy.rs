//! Reschedule acceptance policy.

use super::GuardFailure;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rule applied to the slot requested by a reschedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReschedulePolicy {
    /// Any requested slot is accepted, including past or unchanged ones.
    #[default]
    Permissive,
    /// The requested slot must be strictly after the current time.
    RequireFutureSlot,
}

impl ReschedulePolicy {
    /// Checks a requested slot against the policy.
    ///
    /// # Errors
    ///
    /// Returns [`GuardFailure::RescheduleNotInFuture`] when the policy is
    /// [`ReschedulePolicy::RequireFutureSlot`] and `requested` is not after
    /// `now`.
    pub fn check(
        self,
        requested: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), GuardFailure> {
        match self {
            Self::Permissive => Ok(()),
            Self::RequireFutureSlot if requested > now => Ok(()),
            Self::RequireFutureSlot => Err(GuardFailure::RescheduleNotInFuture { requested, now }),
        }
    }
}
