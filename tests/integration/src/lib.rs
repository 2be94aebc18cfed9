//! Integration test utilities for the help desk
//!
//! This crate provides helpers for running end-to-end tests against
//! the HTTP server.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
