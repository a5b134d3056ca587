//! Stream controller
//!
//! Owns the lifecycle of the single streaming connection: starts a run,
//! routes each event to the reducer, and closes the connection on the final
//! report, on a transport error, or when a new run supersedes it.
//!
//! Network work happens in one spawned task per run. Every message that task
//! sends is tagged with the run's generation; messages from an older
//! generation are discarded.

mod messages;
mod pump;

pub use messages::{ConnectionPhase, ControllerMessage};

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::StreamError;
use crate::models::AgentRegistry;
use crate::state::DashboardState;
use crate::traits::RunBackend;

/// Whether a message affected the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Applied to the current run
    Current,
    /// From a superseded run or a closed connection; dropped
    Stale,
}

pub struct StreamController {
    backend: Arc<dyn RunBackend>,
    message_tx: mpsc::UnboundedSender<ControllerMessage>,
    generation: u64,
    phase: ConnectionPhase,
    task: Option<JoinHandle<()>>,
    state: DashboardState,
    run_id: Option<String>,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
}

impl StreamController {
    /// Create an idle controller. Messages for [`handle`](Self::handle) arrive on
    /// the receiving half of `message_tx`.
    pub fn new(
        backend: Arc<dyn RunBackend>,
        agents: AgentRegistry,
        message_tx: mpsc::UnboundedSender<ControllerMessage>,
    ) -> Self {
        Self {
            backend,
            message_tx,
            generation: 0,
            phase: ConnectionPhase::Idle,
            task: None,
            state: DashboardState::new(agents),
            run_id: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// Start a run for `query`, closing any connection first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_run(&mut self, query: &str) {
        self.close_connection();

        self.generation += 1;
        self.state.begin_run();
        self.run_id = None;
        self.phase = ConnectionPhase::Connecting;
        self.started_at = Some(Instant::now());
        self.finished_at = None;

        info!(generation = self.generation, query = %query, "starting run");

        let task = tokio::spawn(pump::run_pipeline(
            Arc::clone(&self.backend),
            query.to_string(),
            self.generation,
            self.message_tx.clone(),
        ));
        self.task = Some(task);
    }

    /// Apply one message from the network task.
    pub fn handle(&mut self, message: ControllerMessage) -> Handled {
        if message.generation() != self.generation {
            warn!(
                stale = message.generation(),
                current = self.generation,
                "discarding message from superseded run"
            );
            return Handled::Stale;
        }

        match message {
            ControllerMessage::RunTriggered { run_id, .. } => {
                info!(run_id = %run_id, "run accepted");
                self.run_id = Some(run_id);
            }
            ControllerMessage::TriggerFailed { message, .. } => {
                self.task = None;
                self.phase = ConnectionPhase::Idle;
                self.finish();
                self.state.fail(message);
            }
            ControllerMessage::StreamOpened { .. } => {
                if self.phase != ConnectionPhase::Connecting {
                    return Handled::Stale;
                }
                self.phase = ConnectionPhase::Open;
            }
            ControllerMessage::Event { event, .. } => {
                if self.phase != ConnectionPhase::Open {
                    warn!(event = event.event_type_name(), "event on a closed connection");
                    return Handled::Stale;
                }
                if let Err(e) = self.state.apply(&event) {
                    warn!("event not applied: {}", e);
                }
                if event.is_terminal() {
                    info!(run_id = ?self.run_id, "final report received");
                    self.close_connection();
                    self.finish();
                }
            }
            ControllerMessage::Malformed { message, .. } => {
                if self.phase != ConnectionPhase::Open {
                    return Handled::Stale;
                }
                warn!("malformed event: {}", message);
                self.state.set_error(
                    StreamError::InvalidEvent { message }.user_message(),
                );
            }
            ControllerMessage::StreamLost { message, .. } => {
                if self.phase == ConnectionPhase::Closed {
                    return Handled::Stale;
                }
                warn!("stream lost: {}", message);
                self.fail_stream(StreamError::ConnectionLost { message });
            }
            ControllerMessage::StreamEnded { .. } => {
                if self.phase != ConnectionPhase::Open {
                    return Handled::Stale;
                }
                warn!("server closed the stream before the final report");
                self.fail_stream(StreamError::ServerClosed);
            }
        }

        Handled::Current
    }

    fn fail_stream(&mut self, err: StreamError) {
        self.close_connection();
        self.finish();
        self.state.fail(err.user_message());
    }

    /// Abort the network task, if any, and mark the connection closed.
    fn close_connection(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if self.phase != ConnectionPhase::Idle {
            self.phase = ConnectionPhase::Closed;
        }
    }

    fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Instant::now());
        }
    }

    /// Stop any run in progress. Used on shutdown.
    pub fn shutdown(&mut self) {
        self.close_connection();
        self.state.running = false;
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut DashboardState {
        &mut self.state
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Label of the backend, for display.
    pub fn endpoint(&self) -> String {
        self.backend.endpoint()
    }

    /// Time since the run started, frozen once it ends.
    pub fn elapsed(&self) -> Option<Duration> {
        let started = self.started_at?;
        let end = self.finished_at.unwrap_or_else(Instant::now);
        Some(end.saturating_duration_since(started))
    }
}

impl Drop for StreamController {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
