//! Headless mode: one run through the stream controller, printed to stdout.

use std::io::Write;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::report_text::report_text;
use crate::controller::{ControllerMessage, Handled, StreamController};
use crate::error::{DashError, DashResult};
use crate::models::AgentRegistry;
use crate::sse::PipelineEvent;
use crate::state::DashboardState;
use crate::traits::RunBackend;

/// One line describing an applied event.
pub fn event_line(event: &PipelineEvent) -> String {
    match event {
        PipelineEvent::AgentStarted { agent } => format!("[started]   {}", agent),
        PipelineEvent::ToolCalled { agent, tool } => format!(
            "[tool]      {}: {}",
            agent,
            tool.as_deref().unwrap_or("(unnamed)")
        ),
        PipelineEvent::AgentCompleted { agent } => format!("[completed] {}", agent),
        PipelineEvent::FinalReport { .. } => "[report]    final report received".to_string(),
        PipelineEvent::Unknown { kind } => format!("[ignored]   {}", kind),
    }
}

/// Run `query` to completion, writing progress and the report to `out`.
///
/// Returns the final state on success; a run that ends without a final
/// report is an error.
pub async fn run_headless<W: Write>(
    backend: Arc<dyn RunBackend>,
    agents: AgentRegistry,
    query: &str,
    out: &mut W,
) -> DashResult<DashboardState> {
    let (message_tx, mut message_rx) = mpsc::unbounded_channel();
    let mut controller = StreamController::new(backend, agents, message_tx);

    writeln!(out, "Running: {}", query)?;
    controller.start_run(query);

    while controller.is_running() {
        let Some(message) = message_rx.recv().await else {
            break;
        };
        let printable = match &message {
            ControllerMessage::Event { event, .. } => Some(event_line(event)),
            ControllerMessage::RunTriggered { run_id, .. } => Some(format!("Run id: {}", run_id)),
            ControllerMessage::Malformed { message, .. } => Some(format!("[warning]   {}", message)),
            _ => None,
        };
        if controller.handle(message) == Handled::Current {
            if let Some(line) = printable {
                writeln!(out, "{}", line)?;
            }
        }
    }

    let state = controller.state().clone();
    if !state.is_finished() {
        let message = state
            .error
            .clone()
            .unwrap_or_else(|| "run ended without a final report".to_string());
        return Err(DashError::RunFailed { message });
    }

    writeln!(out)?;
    match &state.report {
        Some(report) => write!(out, "{}", report_text(report))?,
        None => writeln!(out, "The pipeline finished without a report.")?,
    }
    out.flush()?;

    Ok(state)
}
