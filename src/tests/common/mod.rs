//! Common Test Utilities
//!
//! Shared test helpers and fixtures used across test modules:
//! - Table builders and a ready-to-roll [`RollerState`](crate::core::ancestry_gen::RollerState) (`fixtures`)

pub mod fixtures;
