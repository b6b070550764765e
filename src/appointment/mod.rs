//! Appointment lifecycle management for Bookwright.
//!
//! This module tracks a bookable appointment from booking to a terminal
//! outcome, rejecting any transition the lifecycle graph does not allow and
//! holding service start until the scheduled slot arrives. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
