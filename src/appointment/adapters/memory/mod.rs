//! In-memory adapters for appointment lifecycle storage.

mod appointment;

pub use appointment::InMemoryAppointmentRepository;
