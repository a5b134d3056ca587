//! Messages from a run's network task back to the controller.

use crate::sse::PipelineEvent;

/// Lifecycle of the single streaming connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionPhase {
    /// No run has been started, or the last trigger failed
    #[default]
    Idle,
    /// Run requested; waiting for the run id or the stream to open
    Connecting,
    /// Stream is open and events are being applied
    Open,
    /// Stream ended by a final report, an error, or supersession
    Closed,
}

impl ConnectionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionPhase::Idle => "idle",
            ConnectionPhase::Connecting => "connecting",
            ConnectionPhase::Open => "open",
            ConnectionPhase::Closed => "closed",
        }
    }
}

/// Result of network work for one run, tagged with the run's generation.
#[derive(Debug, Clone)]
pub enum ControllerMessage {
    /// The server accepted the run
    RunTriggered { generation: u64, run_id: String },
    /// The run could not be started
    TriggerFailed { generation: u64, message: String },
    /// The event stream is connected
    StreamOpened { generation: u64 },
    /// One event, in delivery order
    Event { generation: u64, event: PipelineEvent },
    /// A message that did not parse as an event
    Malformed { generation: u64, message: String },
    /// The transport failed
    StreamLost { generation: u64, message: String },
    /// The server closed the stream
    StreamEnded { generation: u64 },
}

impl ControllerMessage {
    /// Generation of the run this message belongs to.
    pub fn generation(&self) -> u64 {
        match self {
            ControllerMessage::RunTriggered { generation, .. }
            | ControllerMessage::TriggerFailed { generation, .. }
            | ControllerMessage::StreamOpened { generation }
            | ControllerMessage::Event { generation, .. }
            | ControllerMessage::Malformed { generation, .. }
            | ControllerMessage::StreamLost { generation, .. }
            | ControllerMessage::StreamEnded { generation } => *generation,
        }
    }
}
