//! Event-stream reducer.
//!
//! Turns one [`PipelineEvent`] into a change of [`DashboardState`]. Events
//! are applied strictly in delivery order; nothing here suspends or spawns.

use thiserror::Error;
use tracing::{debug, warn};

use super::DashboardState;
use crate::sse::PipelineEvent;

/// What an applied event changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// An agent's status or tool changed
    Agent(String),
    /// The terminal event stored the report and ended the run
    Finished,
    /// Nothing changed (unknown event kind)
    Ignored,
}

/// An event that could not be applied. Never fatal for the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError {
    #[error("{event_type} for unknown agent '{agent}'")]
    UnknownAgent { event_type: String, agent: String },
    #[error("{event_type} received after the final report")]
    RunFinished { event_type: String },
}

impl DashboardState {
    /// Apply one event in place.
    ///
    /// Unknown agents and events after the terminal one are rejected without
    /// touching the state.
    pub fn apply(&mut self, event: &PipelineEvent) -> Result<Transition, ReduceError> {
        if self.finished {
            return Err(ReduceError::RunFinished {
                event_type: event.event_type_name().to_string(),
            });
        }

        match event {
            PipelineEvent::AgentStarted { agent } => {
                self.agent_mut(event, agent)?.start();
                Ok(Transition::Agent(agent.clone()))
            }
            PipelineEvent::ToolCalled { agent, tool } => {
                self.agent_mut(event, agent)?.set_tool(tool.clone());
                Ok(Transition::Agent(agent.clone()))
            }
            PipelineEvent::AgentCompleted { agent } => {
                self.agent_mut(event, agent)?.complete();
                Ok(Transition::Agent(agent.clone()))
            }
            PipelineEvent::FinalReport { report } => {
                self.report = report.clone();
                self.running = false;
                self.finished = true;
                Ok(Transition::Finished)
            }
            PipelineEvent::Unknown { kind } => {
                debug!(kind = %kind, "ignoring unknown event kind");
                Ok(Transition::Ignored)
            }
        }
    }

    fn agent_mut(
        &mut self,
        event: &PipelineEvent,
        agent: &str,
    ) -> Result<&mut crate::models::AgentInfo, ReduceError> {
        self.agents
            .get_mut(agent)
            .ok_or_else(|| ReduceError::UnknownAgent {
                event_type: event.event_type_name().to_string(),
                agent: agent.to_string(),
            })
    }
}

/// Pure transition function: the state after `event`.
///
/// Rejected events are logged and leave the state unchanged.
pub fn reduce(mut state: DashboardState, event: &PipelineEvent) -> DashboardState {
    match state.apply(event) {
        Ok(transition) => debug!(event = event.event_type_name(), ?transition, "event applied"),
        Err(e) => warn!("event not applied: {}", e),
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgentRegistry, AgentStatus, Report};
    use serde_json::{json, Map, Value};

    const RESEARCH: &str = "Research Agent";

    fn started(agent: &str) -> PipelineEvent {
        PipelineEvent::AgentStarted {
            agent: agent.to_string(),
        }
    }

    fn tool(agent: &str, name: &str) -> PipelineEvent {
        PipelineEvent::ToolCalled {
            agent: agent.to_string(),
            tool: Some(name.to_string()),
        }
    }

    fn completed(agent: &str) -> PipelineEvent {
        PipelineEvent::AgentCompleted {
            agent: agent.to_string(),
        }
    }

    fn final_report(value: Value) -> PipelineEvent {
        let report = match value {
            Value::Object(map) => Some(Report::new(map)),
            _ => None,
        };
        PipelineEvent::FinalReport { report }
    }

    fn running_state() -> DashboardState {
        let mut state = DashboardState::new(AgentRegistry::default());
        state.begin_run();
        state
    }

    /// Checks the displayed tool; a `tool_called` on an idle agent is still
    /// stored in `tool`.
    fn assert_tool_shown_only_while_running(state: &DashboardState) {
        for agent in state.agents.iter() {
            if agent.status != AgentStatus::Running {
                assert!(
                    agent.visible_tool().is_none(),
                    "{} is {:?} but shows tool {:?}",
                    agent.name,
                    agent.status,
                    agent.tool
                );
            }
        }
    }

    #[test]
    fn test_agent_started_sets_running_and_clears_tool() {
        let mut state = running_state();
        state.agents.get_mut(RESEARCH).unwrap().set_tool(Some("stale".into()));

        let transition = state.apply(&started(RESEARCH)).unwrap();

        assert_eq!(transition, Transition::Agent(RESEARCH.to_string()));
        let agent = state.agents.get(RESEARCH).unwrap();
        assert_eq!(agent.status, AgentStatus::Running);
        assert!(agent.tool.is_none());
    }

    #[test]
    fn test_tool_called_keeps_status() {
        let mut state = running_state();
        state.apply(&started(RESEARCH)).unwrap();
        state.apply(&tool(RESEARCH, "web_search")).unwrap();

        let agent = state.agents.get(RESEARCH).unwrap();
        assert_eq!(agent.status, AgentStatus::Running);
        assert_eq!(agent.visible_tool(), Some("web_search"));
    }

    #[test]
    fn test_tool_called_on_idle_agent_is_not_shown() {
        let mut state = running_state();
        state.apply(&tool(RESEARCH, "web_search")).unwrap();

        let agent = state.agents.get(RESEARCH).unwrap();
        assert_eq!(agent.status, AgentStatus::Idle);
        assert_eq!(agent.tool.as_deref(), Some("web_search"));
        assert!(agent.visible_tool().is_none());
    }

    #[test]
    fn test_agent_completed_clears_tool() {
        let mut state = running_state();
        state.apply(&started(RESEARCH)).unwrap();
        state.apply(&tool(RESEARCH, "web_search")).unwrap();
        state.apply(&completed(RESEARCH)).unwrap();

        let agent = state.agents.get(RESEARCH).unwrap();
        assert_eq!(agent.status, AgentStatus::Completed);
        assert!(agent.tool.is_none());
    }

    #[test]
    fn test_unknown_agent_is_rejected_without_change() {
        let mut state = running_state();
        let before = state.clone();

        let result = state.apply(&started("Ghost Agent"));

        assert_eq!(
            result,
            Err(ReduceError::UnknownAgent {
                event_type: "agent_started".to_string(),
                agent: "Ghost Agent".to_string(),
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_unknown_kind_is_a_no_op() {
        let mut state = running_state();
        let before = state.clone();

        let transition = state
            .apply(&PipelineEvent::Unknown {
                kind: "heartbeat".to_string(),
            })
            .unwrap();

        assert_eq!(transition, Transition::Ignored);
        assert_eq!(state, before);
    }

    #[test]
    fn test_final_report_ends_run() {
        let mut state = running_state();
        let transition = state.apply(&final_report(json!({"raw_output": "x"}))).unwrap();

        assert_eq!(transition, Transition::Finished);
        assert!(!state.running);
        assert!(state.is_finished());
        assert_eq!(state.report.as_ref().map(|r| r.raw_output()), Some("x".to_string()));
    }

    #[test]
    fn test_final_report_without_payload() {
        let mut state = running_state();
        state.apply(&PipelineEvent::FinalReport { report: None }).unwrap();
        assert!(state.report.is_none());
        assert!(!state.running);
    }

    #[test]
    fn test_events_after_final_report_are_rejected() {
        let mut state = running_state();
        state.apply(&final_report(json!({}))).unwrap();
        let before = state.clone();

        let result = state.apply(&started(RESEARCH));

        assert!(matches!(result, Err(ReduceError::RunFinished { .. })));
        assert_eq!(state, before);
    }

    #[test]
    fn test_reduce_is_deterministic() {
        let events = vec![
            started(RESEARCH),
            tool(RESEARCH, "web_search"),
            started("Ghost Agent"),
            completed(RESEARCH),
            started("Analysis Agent"),
            PipelineEvent::Unknown {
                kind: "progress".to_string(),
            },
            final_report(json!({"raw_output": "done"})),
            completed("Analysis Agent"),
        ];

        let run = || events.iter().fold(running_state(), reduce);
        assert_eq!(run(), run());
    }

    #[test]
    fn test_displayed_tool_only_on_running_agents_after_every_transition() {
        let agents = ["Research Agent", "Analysis Agent", "Report Agent", "Ghost"];
        let mut state = running_state();

        // Cycle through every event kind for every agent in a scrambled order
        for step in 0..60usize {
            let agent = agents[(step * 7) % agents.len()];
            let event = match (step * 5) % 4 {
                0 => started(agent),
                1 => tool(agent, &format!("tool-{}", step)),
                2 => completed(agent),
                _ => PipelineEvent::ToolCalled {
                    agent: agent.to_string(),
                    tool: None,
                },
            };
            state = reduce(state, &event);
            assert_tool_shown_only_while_running(&state);
        }
    }

    #[test]
    fn test_scenario_research_agent_to_structured_report() {
        let embedded = r#"{"title":"T","summary":"S","key_points":["a","b"]}"#;
        let mut raw = Map::new();
        raw.insert(
            "raw_output".to_string(),
            Value::String(format!("Here is the report:\n{}\nDone.", embedded)),
        );

        let state = [
            started(RESEARCH),
            tool(RESEARCH, "web_search"),
            completed(RESEARCH),
            PipelineEvent::FinalReport {
                report: Some(Report::new(raw)),
            },
        ]
        .iter()
        .fold(running_state(), reduce);

        let agent = state.agents.get(RESEARCH).unwrap();
        assert_eq!(agent.status, AgentStatus::Completed);
        assert!(agent.tool.is_none());
        assert!(!state.running);

        let structured = state.report.as_ref().and_then(|r| r.structured()).unwrap();
        assert_eq!(structured.title(), Some("T"));
        assert_eq!(structured.summary(), Some("S"));
        assert_eq!(
            structured.key_points(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert!(structured.limitations().is_none());
    }
}
