//! Mock implementations for testing.
//!
//! - [`MockBackend`] - Scripted run triggers and event streams

pub mod backend;

pub use backend::{MockBackend, MockStream};
