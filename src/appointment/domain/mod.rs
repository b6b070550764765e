//! Domain model for the appointment lifecycle.
//!
//! The appointment domain owns the lifecycle state machine and its error
//! types. It is synchronous, performs no I/O or logging, and reads wall-clock
//! time only through an injected [`mockable::Clock`].

mod appointment;
mod error;
mod ids;
mod policy;
mod state;
mod transition;

pub use appointment::{
    AppointmentLifecycle, AppointmentRecord, PersistedAppointmentData, TransitionResult,
};
pub use error::{
    AppointmentDomainError, AppointmentTransitionError, GuardFailure, ParseAppointmentStateError,
};
pub use ids::{AppointmentDetails, AppointmentId};
pub use policy::ReschedulePolicy;
pub use state::AppointmentState;
pub use transition::AppointmentTransition;
