//! Port contracts for appointment lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by appointment
//! services.

pub mod repository;

pub use repository::{
    AppointmentRepository, AppointmentRepositoryError, AppointmentRepositoryResult,
};
