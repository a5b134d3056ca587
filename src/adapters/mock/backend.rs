//! Mock run backend for testing.
//!
//! Trigger results and event streams are scripted up front; a stream can
//! also be driven live through a channel to exercise ordering and
//! supersession.

use async_trait::async_trait;
use futures::stream;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

use crate::client::{ClientError, EventStream};
use crate::sse::PipelineEvent;
use crate::traits::RunBackend;

type StreamItem = Result<PipelineEvent, ClientError>;

/// Scripted outcome of `open_events` for one run id.
#[derive(Debug)]
pub enum MockStream {
    /// Yield these items, then end
    Items(Vec<StreamItem>),
    /// Yield whatever the test sends; ends when the sender is dropped
    Channel(mpsc::UnboundedReceiver<StreamItem>),
    /// Fail to open the stream
    OpenError(ClientError),
}

/// Mock backend for testing.
///
/// Runs without a scripted trigger result get sequential ids `run-1`,
/// `run-2`, ... Opening a stream that was never scripted yields an empty
/// stream, which the controller treats as a lost connection.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    triggers: Arc<Mutex<VecDeque<Result<String, ClientError>>>>,
    streams: Arc<Mutex<HashMap<String, MockStream>>>,
    queries: Arc<Mutex<Vec<String>>>,
    opened: Arc<Mutex<Vec<String>>>,
    counter: Arc<Mutex<u64>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next `trigger_run` call.
    pub fn push_trigger(&self, result: Result<String, ClientError>) {
        lock(&self.triggers).push_back(result);
    }

    /// Script the event stream of `run_id`.
    pub fn set_stream(&self, run_id: &str, stream: MockStream) {
        lock(&self.streams).insert(run_id.to_string(), stream);
    }

    /// Script a finite list of events for `run_id`.
    pub fn set_events(&self, run_id: &str, events: Vec<PipelineEvent>) {
        self.set_stream(run_id, MockStream::Items(events.into_iter().map(Ok).collect()));
    }

    /// Script a live stream for `run_id` and return its sending half.
    pub fn channel_stream(&self, run_id: &str) -> mpsc::UnboundedSender<StreamItem> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.set_stream(run_id, MockStream::Channel(rx));
        tx
    }

    /// Queries passed to `trigger_run`, in call order.
    pub fn queries(&self) -> Vec<String> {
        lock(&self.queries).clone()
    }

    /// Run ids passed to `open_events`, in call order.
    pub fn opened_streams(&self) -> Vec<String> {
        lock(&self.opened).clone()
    }

    fn next_run_id(&self) -> String {
        let mut counter = lock(&self.counter);
        *counter += 1;
        format!("run-{}", *counter)
    }
}

#[async_trait]
impl RunBackend for MockBackend {
    async fn trigger_run(&self, query: &str) -> Result<String, ClientError> {
        lock(&self.queries).push(query.to_string());
        let scripted = lock(&self.triggers).pop_front();
        match scripted {
            Some(result) => result,
            None => Ok(self.next_run_id()),
        }
    }

    async fn open_events(&self, run_id: &str) -> Result<EventStream, ClientError> {
        lock(&self.opened).push(run_id.to_string());
        let scripted = lock(&self.streams).remove(run_id);
        match scripted {
            Some(MockStream::Items(items)) => Ok(Box::pin(stream::iter(items))),
            Some(MockStream::Channel(rx)) => Ok(Box::pin(stream::unfold(rx, |mut rx| async move {
                rx.recv().await.map(|item| (item, rx))
            }))),
            Some(MockStream::OpenError(err)) => Err(err),
            None => Ok(Box::pin(stream::empty())),
        }
    }

    fn endpoint(&self) -> String {
        "mock://pipeline".to_string()
    }
}
