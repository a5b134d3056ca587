//! Agent status model and the fixed registry of known agents.

use serde::{Deserialize, Serialize};

/// Agent names shown before any event arrives, in display order.
pub const DEFAULT_AGENTS: [&str; 3] = ["Research Agent", "Analysis Agent", "Report Agent"];

/// Lifecycle status of a single pipeline agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Not yet started in the current run
    #[default]
    Idle,
    /// Started and not yet completed
    Running,
    /// Finished its step
    Completed,
}

impl AgentStatus {
    /// Short label used by status badges.
    pub fn label(&self) -> &'static str {
        match self {
            AgentStatus::Idle => "Idle",
            AgentStatus::Running => "Running",
            AgentStatus::Completed => "Completed",
        }
    }
}

/// One agent card: its name, status, and the tool it is currently invoking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub name: String,
    pub status: AgentStatus,
    /// Currently-invoked tool, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
}

impl AgentInfo {
    /// Create an idle agent with no tool.
    pub fn idle(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: AgentStatus::Idle,
            tool: None,
        }
    }

    /// Mark as running; a fresh start never carries a previous tool.
    pub fn start(&mut self) {
        self.status = AgentStatus::Running;
        self.tool = None;
    }

    /// Record a tool invocation. Status is left untouched.
    pub fn set_tool(&mut self, tool: Option<String>) {
        self.tool = tool;
    }

    /// Mark as completed and clear the tool.
    pub fn complete(&mut self) {
        self.status = AgentStatus::Completed;
        self.tool = None;
    }

    /// Tool to display: only meaningful while the agent is running.
    pub fn visible_tool(&self) -> Option<&str> {
        match self.status {
            AgentStatus::Running => self.tool.as_deref(),
            _ => None,
        }
    }
}

/// Ordered, fixed set of agents for a run.
///
/// Names are declared up front and never added or removed while a run is in
/// progress; events update entries in place by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRegistry {
    agents: Vec<AgentInfo>,
}

impl AgentRegistry {
    /// Build a registry from names, keeping the first occurrence of duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut agents: Vec<AgentInfo> = Vec::new();
        for name in names {
            let name = name.into();
            if !agents.iter().any(|a| a.name == name) {
                agents.push(AgentInfo::idle(name));
            }
        }
        Self { agents }
    }

    pub fn get(&self, name: &str) -> Option<&AgentInfo> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AgentInfo> {
        self.agents.iter_mut().find(|a| a.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Return every agent to idle with no tool.
    pub fn reset(&mut self) {
        for agent in &mut self.agents {
            agent.status = AgentStatus::Idle;
            agent.tool = None;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentInfo> {
        self.agents.iter()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.name.clone()).collect()
    }

    /// Number of agents with the given status.
    pub fn count(&self, status: AgentStatus) -> usize {
        self.agents.iter().filter(|a| a.status == status).count()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::from_names(DEFAULT_AGENTS)
    }
}
