//! Configuration for the appointment lifecycle service.

use crate::appointment::domain::ReschedulePolicy;

/// Tunable behaviour of [`super::AppointmentLifecycleService`].
///
/// # Examples
///
/// ```
/// use bookwright::appointment::domain::ReschedulePolicy;
/// use bookwright::appointment::services::AppointmentServiceConfig;
///
/// let config = AppointmentServiceConfig::default();
/// assert_eq!(config.reschedule_policy, ReschedulePolicy::Permissive);
///
/// let strict = AppointmentServiceConfig::strict();
/// assert_eq!(strict.reschedule_policy, ReschedulePolicy::RequireFutureSlot);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppointmentServiceConfig {
    /// Rule applied to slots requested through a reschedule command.
    pub reschedule_policy: ReschedulePolicy,
}

impl AppointmentServiceConfig {
    /// Creates a configuration that only accepts reschedules into the future.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            reschedule_policy: ReschedulePolicy::RequireFutureSlot,
        }
    }

    /// Sets the reschedule policy.
    #[must_use]
    pub const fn with_reschedule_policy(mut self, policy: ReschedulePolicy) -> Self {
        self.reschedule_policy = policy;
        self
    }
}
