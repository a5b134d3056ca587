//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`RunBackend`] - Triggering runs and opening their event streams

pub mod backend;

pub use backend::RunBackend;
