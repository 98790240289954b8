//! Sensor view model tests
//!
//! History buffer, satellite registry, position tracker, motion monitor,
//! error advisories and the simulated providers.

pub mod error_test;
pub mod simulated_test;
pub mod stream_test;
