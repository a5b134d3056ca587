//! `RunBackend` implementation backed by the HTTP pipeline client.

use async_trait::async_trait;

use crate::client::{ClientError, EventStream, PipelineClient};
use crate::traits::RunBackend;

#[async_trait]
impl RunBackend for PipelineClient {
    async fn trigger_run(&self, query: &str) -> Result<String, ClientError> {
        PipelineClient::trigger_run(self, query).await
    }

    async fn open_events(&self, run_id: &str) -> Result<EventStream, ClientError> {
        self.events(run_id).await
    }

    fn endpoint(&self) -> String {
        self.base_url.clone()
    }
}
