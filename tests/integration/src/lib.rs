//! Integration test utilities for the gallery feedback server
//!
//! Spawns the real API against PostgreSQL and seeds photos the way the
//! upload pipeline would.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
