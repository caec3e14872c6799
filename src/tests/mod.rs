//! Crate-internal test suites.
//!
//! Unit tests live next to their modules. This tree holds shared fixtures
//! and the property-based suites.

pub mod common;
mod property;
