//! Pipeline API client for backend communication.
//!
//! This module provides the HTTP client for the pipeline server: triggering a
//! run, streaming its events via Server-Sent Events (SSE), and fetching the
//! stored result.

use crate::models::{Report, RunRequest, RunResponse};
use crate::sse::{LineBuffer, PipelineEvent, SseParseError, SseParser};
use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use std::pin::Pin;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Stream of typed events for one run.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<PipelineEvent, ClientError>> + Send>>;

/// Error type for pipeline client operations
#[derive(Debug)]
pub enum ClientError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// SSE parsing failed
    SseParse(SseParseError),
    /// JSON deserialization failed
    Json(serde_json::Error),
    /// Server returned an error status
    ServerError { status: u16, message: String },
    /// The event stream broke without an HTTP-level error to report
    Disconnected { message: String },
}

impl ClientError {
    /// True when the item describes a bad message rather than a broken connection.
    pub fn is_malformed_event(&self) -> bool {
        matches!(self, ClientError::SseParse(_) | ClientError::Json(_))
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "HTTP error: {}", e),
            ClientError::SseParse(e) => write!(f, "SSE parse error: {}", e),
            ClientError::Json(e) => write!(f, "JSON error: {}", e),
            ClientError::ServerError { message, .. } => write!(f, "{}", message),
            ClientError::Disconnected { message } => write!(f, "Disconnected: {}", message),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Http(e) => Some(e),
            ClientError::SseParse(e) => Some(e),
            ClientError::Json(e) => Some(e),
            ClientError::ServerError { .. } | ClientError::Disconnected { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e)
    }
}

impl From<SseParseError> for ClientError {
    fn from(e: SseParseError) -> Self {
        ClientError::SseParse(e)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Json(e)
    }
}

/// Outcome of `GET /result/{run_id}`.
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    /// The run finished and its report is stored
    Ready(Report),
    /// The run exists but has not finished yet
    Pending,
}

/// Client for interacting with the pipeline server.
pub struct PipelineClient {
    /// Base URL for the pipeline API, without a trailing slash
    pub base_url: String,
    /// Reusable HTTP client
    client: Client,
}

impl PipelineClient {
    /// Create a new PipelineClient with the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new PipelineClient with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Start a run and return its identifier.
    ///
    /// Sends `POST /run` with `{"query": ...}`. Any non-2xx status is a
    /// `ServerError` whose message names the failing call.
    pub async fn trigger_run(&self, query: &str) -> Result<String, ClientError> {
        let url = format!("{}/run", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&RunRequest::new(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "POST /run rejected");
            return Err(ClientError::ServerError {
                status: status.as_u16(),
                message: format!("POST /run failed: {}", status.as_u16()),
            });
        }

        let body = response.text().await?;
        let parsed: RunResponse = serde_json::from_str(&body)?;
        tracing::info!(run_id = %parsed.run_id, "run triggered");
        Ok(parsed.run_id)
    }

    /// Open the event stream of a run.
    ///
    /// Sends `GET /events/{run_id}` and returns a stream of parsed events. The
    /// stream ends when the server closes the connection; a malformed message
    /// yields an `Err` item and the stream continues.
    pub async fn events(&self, run_id: &str) -> Result<EventStream, ClientError> {
        let url = format!("{}/events/{}", self.base_url, run_id);

        let response = self
            .client
            .get(&url)
            .header("Accept", "text/event-stream")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(ClientError::ServerError {
                status,
                message: format!("GET /events/{} failed: {}", run_id, status),
            });
        }

        let bytes_stream = response.bytes_stream();

        let event_stream = stream::unfold(
            (bytes_stream, SseParser::new(), LineBuffer::new(), false),
            |(mut bytes_stream, mut parser, mut lines, finished)| async move {
                loop {
                    // First drain complete lines already buffered
                    while let Some(line) = lines.next_line() {
                        match parser.feed_line(&line) {
                            Ok(Some(event)) => {
                                return Some((Ok(event), (bytes_stream, parser, lines, finished)));
                            }
                            Ok(None) => continue,
                            Err(e) => {
                                return Some((
                                    Err(ClientError::SseParse(e)),
                                    (bytes_stream, parser, lines, finished),
                                ));
                            }
                        }
                    }

                    if finished {
                        return None;
                    }

                    match bytes_stream.next().await {
                        Some(Ok(chunk)) => lines.push(&chunk),
                        Some(Err(e)) => {
                            return Some((
                                Err(ClientError::Http(e)),
                                (bytes_stream, parser, lines, true),
                            ));
                        }
                        None => {
                            // An event needs its blank line; a cut-off one is dropped
                            if lines.finish().is_some() || parser.has_pending() {
                                tracing::debug!("discarding unterminated event at end of stream");
                            }
                            return None;
                        }
                    }
                }
            },
        );

        Ok(Box::pin(event_stream))
    }

    /// Fetch the stored result of a run.
    ///
    /// `200` yields the report, `202` means the run is still in progress and
    /// `404` is reported as a `ServerError` naming the unknown run.
    pub async fn fetch_result(&self, run_id: &str) -> Result<RunResult, ClientError> {
        let url = format!("{}/result/{}", self.base_url, run_id);

        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                let fields: Map<String, Value> = serde_json::from_str(&body)?;
                Ok(RunResult::Ready(Report::new(fields)))
            }
            StatusCode::ACCEPTED => Ok(RunResult::Pending),
            StatusCode::NOT_FOUND => Err(ClientError::ServerError {
                status: 404,
                message: format!("Run {} not found", run_id),
            }),
            status => Err(ClientError::ServerError {
                status: status.as_u16(),
                message: format!("GET /result/{} failed: {}", run_id, status.as_u16()),
            }),
        }
    }
}

impl Default for PipelineClient {
    fn default() -> Self {
        Self::new()
    }
}
