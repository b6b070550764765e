//! Unit tests for the appointment lifecycle.

mod support;
