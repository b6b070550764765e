//! Application services for appointment lifecycle orchestration.

mod config;
mod lifecycle;

pub use config::AppointmentServiceConfig;
pub use lifecycle::{
    AppointmentCommand, AppointmentLifecycleService, AppointmentServiceError,
    AppointmentServiceResult, BookAppointmentRequest,
};
