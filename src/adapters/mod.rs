//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - `PipelineClient` implements [`RunBackend`](crate::traits::RunBackend) over HTTP/SSE
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides [`mock::MockBackend`], a scripted backend
//! for controller and UI tests.

pub mod mock;
mod pipeline;

pub use mock::{MockBackend, MockStream};
