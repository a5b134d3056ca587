//! Dashboard state container
//!
//! Holds everything the view renders for the current run. Only the reducer
//! and the stream controller mutate it.

use crate::models::{AgentRegistry, Report};

/// View state of the current (or last) run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    /// Known agents in display order
    pub agents: AgentRegistry,
    /// Report from the terminal event, if any
    pub report: Option<Report>,
    /// True from run start until the terminal event or a failure
    pub running: bool,
    /// Last user-visible error
    pub error: Option<String>,
    /// Set once the terminal event is applied; later events are dropped
    pub(crate) finished: bool,
}

impl DashboardState {
    /// Create an idle state for the given agents.
    pub fn new(agents: AgentRegistry) -> Self {
        Self {
            agents,
            ..Self::default()
        }
    }

    /// Reset for a new run: all agents idle, no report, no error, running.
    pub fn begin_run(&mut self) {
        self.agents.reset();
        self.report = None;
        self.error = None;
        self.running = true;
        self.finished = false;
    }

    /// Stop the run with a visible error. Agent statuses are left as they are.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.running = false;
        self.error = Some(message.into());
    }

    /// Show an error without ending the run.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// True once the terminal event has been applied for this run.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
