//! Run backend trait abstraction.
//!
//! The stream controller talks to the pipeline through this trait so tests
//! can script runs without a server.

use async_trait::async_trait;

use crate::client::{ClientError, EventStream};

/// Trait for the operations a run needs from the pipeline server.
///
/// # Example
///
/// ```ignore
/// use agentdash::traits::RunBackend;
///
/// async fn start<B: RunBackend>(backend: &B) -> Result<(), ClientError> {
///     let run_id = backend.trigger_run("Analyze trends").await?;
///     let mut events = backend.open_events(&run_id).await?;
///     while let Some(event) = events.next().await { /* ... */ }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait RunBackend: Send + Sync {
    /// Start a run for `query` and return its identifier.
    async fn trigger_run(&self, query: &str) -> Result<String, ClientError>;

    /// Open the ordered event stream of a run.
    async fn open_events(&self, run_id: &str) -> Result<EventStream, ClientError>;

    /// Base URL or other label shown in the dashboard header.
    fn endpoint(&self) -> String;
}
