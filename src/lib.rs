//! Bookwright: appointment lifecycle tracking.
//!
//! This crate tracks a bookable appointment through its business states,
//! rejecting transitions the lifecycle does not allow and holding service
//! start until the booked slot arrives.
//!
//! # Architecture
//!
//! Bookwright follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`appointment`]: Appointment lifecycle state machine, storage port and
//!   orchestration service

pub mod appointment;
