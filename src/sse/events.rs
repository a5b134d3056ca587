//! Pipeline event types and SSE framing primitives.

use crate::models::Report;

/// Typed events pushed by the pipeline server for a single run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// An agent began its step
    AgentStarted { agent: String },
    /// An agent invoked a tool
    ToolCalled { agent: String, tool: Option<String> },
    /// An agent finished its step
    AgentCompleted { agent: String },
    /// Terminal event carrying the run's report
    FinalReport { report: Option<Report> },
    /// A `type` this client does not know; ignored downstream
    Unknown { kind: String },
}

impl PipelineEvent {
    /// Returns the wire name of the event type.
    pub fn event_type_name(&self) -> &str {
        match self {
            PipelineEvent::AgentStarted { .. } => "agent_started",
            PipelineEvent::ToolCalled { .. } => "tool_called",
            PipelineEvent::AgentCompleted { .. } => "agent_completed",
            PipelineEvent::FinalReport { .. } => "final_report",
            PipelineEvent::Unknown { kind } => kind,
        }
    }

    /// Agent the event refers to, if any.
    pub fn agent(&self) -> Option<&str> {
        match self {
            PipelineEvent::AgentStarted { agent }
            | PipelineEvent::ToolCalled { agent, .. }
            | PipelineEvent::AgentCompleted { agent } => Some(agent),
            _ => None,
        }
    }

    /// True for the event that ends a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineEvent::FinalReport { .. })
    }
}

/// Represents a parsed SSE line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event type declaration (e.g., "event: message")
    Event(String),
    /// Data payload (e.g., "data: {\"type\": \"agent_started\"}")
    Data(String),
    /// Empty line - signals end of event
    Empty,
    /// Comment line (starts with ':'), also used for `id:`/`retry:` fields
    Comment(String),
}

/// Errors that can occur during SSE parsing
#[derive(Debug, Clone, PartialEq)]
pub enum SseParseError {
    /// Invalid JSON in data payload
    InvalidJson { event_type: String, source: String },
    /// Missing data for event
    MissingData { event_type: String },
    /// A field the event type requires is absent
    MissingField {
        event_type: String,
        field: &'static str,
    },
    /// A field is present but has the wrong JSON type
    InvalidField {
        event_type: String,
        field: &'static str,
        expected: &'static str,
    },
}

impl std::fmt::Display for SseParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SseParseError::InvalidJson { event_type, source } => {
                write!(f, "Invalid JSON for event '{}': {}", event_type, source)
            }
            SseParseError::MissingData { event_type } => {
                write!(f, "Missing data for event type: {}", event_type)
            }
            SseParseError::MissingField { event_type, field } => {
                write!(f, "Event '{}' is missing required field '{}'", event_type, field)
            }
            SseParseError::InvalidField {
                event_type,
                field,
                expected,
            } => write!(
                f,
                "Event '{}' has invalid field '{}': expected {}",
                event_type, field, expected
            ),
        }
    }
}

impl std::error::Error for SseParseError {}
