//! UI rendering for the dashboard
//!
//! Layout, top to bottom:
//! - Header with title, endpoint, run id, and elapsed time
//! - Query bar
//! - Error banner (only when an error is set)
//! - Agent cards on the left, final output on the right
//! - Keybind footer

mod agents;
mod header;
mod helpers;
mod output;
mod theme;

pub use header::{SUBTITLE, TITLE};
pub use helpers::{format_elapsed, SPINNER_FRAMES};
pub use output::{IDLE_PLACEHOLDER, WAITING_PLACEHOLDER};
pub use theme::{COLOR_COMPLETED, COLOR_ERROR, COLOR_IDLE, COLOR_RUNNING};

use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::app::App;
use agents::render_agent_panel;
use header::{render_error_banner, render_footer, render_header, render_query_bar};
use output::render_output_panel;

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the whole dashboard.
pub fn render(frame: &mut Frame, app: &mut App) {
    let has_error = app.state().error.is_some();
    let [header, query, banner, main, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(if has_error { 3 } else { 0 }),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header, app);
    render_query_bar(frame, query, app);
    if let Some(message) = app.state().error.as_deref() {
        render_error_banner(frame, banner, message);
    }

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(main);
    render_agent_panel(frame, left, app);
    render_output_panel(frame, right, app);

    render_footer(frame, footer, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::models::Report;
    use crate::sse::PipelineEvent;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::{json, Value};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        buffer_text(&terminal)
    }

    fn report(value: Value) -> Report {
        match value {
            Value::Object(map) => Report::new(map),
            _ => panic!("object expected"),
        }
    }

    #[tokio::test]
    async fn test_idle_dashboard() {
        let (mut app, _) = test_app();
        let text = draw(&mut app);
        assert!(text.contains(TITLE));
        assert!(text.contains("Research Agent"));
        assert!(text.contains("Analysis Agent"));
        assert!(text.contains("Report Agent"));
        assert!(text.contains("Idle"));
        assert!(text.contains(IDLE_PLACEHOLDER));
        assert!(text.contains("mock://pipeline"));
    }

    #[tokio::test]
    async fn test_running_agent_shows_tool() {
        let (mut app, _) = test_app();
        app.submit_query();
        app.controller.state_mut().apply(&PipelineEvent::AgentStarted {
            agent: "Research Agent".to_string(),
        }).unwrap();
        app.controller.state_mut().apply(&PipelineEvent::ToolCalled {
            agent: "Research Agent".to_string(),
            tool: Some("web_search".to_string()),
        }).unwrap();

        let text = draw(&mut app);
        assert!(text.contains("Running"));
        assert!(text.contains("Tool: web_search"));
        assert!(text.contains(WAITING_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_completed_agent_hides_tool() {
        let (mut app, _) = test_app();
        app.submit_query();
        let state = app.controller.state_mut();
        for event in [
            PipelineEvent::AgentStarted { agent: "Research Agent".to_string() },
            PipelineEvent::ToolCalled {
                agent: "Research Agent".to_string(),
                tool: Some("web_search".to_string()),
            },
            PipelineEvent::AgentCompleted { agent: "Research Agent".to_string() },
        ] {
            state.apply(&event).unwrap();
        }

        let text = draw(&mut app);
        assert!(text.contains("Completed"));
        assert!(!text.contains("Tool: web_search"));
    }

    #[tokio::test]
    async fn test_structured_report_sections() {
        let (mut app, _) = test_app();
        app.submit_query();
        app.controller
            .state_mut()
            .apply(&PipelineEvent::FinalReport {
                report: Some(report(json!({
                    "raw_output": "Sure! {\"title\": \"Agent Trends\", \"summary\": \"Things moved.\", \"key_points\": [\"tools\", \"memory\"], \"limitations\": []}"
                }))),
            })
            .unwrap();

        let text = draw(&mut app);
        assert!(text.contains("Structured Report"));
        assert!(text.contains("Agent Trends"));
        assert!(text.contains("Things moved."));
        assert!(text.contains("• tools"));
        assert!(text.contains("Key Points"));
        assert!(!text.contains("Limitations"));
        assert!(text.contains("▸ Raw Model Output"));
        assert!(!text.contains("Sure!"));
    }

    #[tokio::test]
    async fn test_unstructured_report_with_raw_expanded() {
        let (mut app, _) = test_app();
        app.submit_query();
        app.controller
            .state_mut()
            .apply(&PipelineEvent::FinalReport {
                report: Some(report(json!({"raw_output": "no json at all"}))),
            })
            .unwrap();
        app.raw_expanded = true;

        let text = draw(&mut app);
        assert!(text.contains("Unable to parse structured report"));
        assert!(text.contains("▾ Raw Model Output"));
        assert!(text.contains("no json at all"));
    }

    #[tokio::test]
    async fn test_long_report_scrolls_into_view() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let (mut app, _) = test_app();
        app.submit_query();
        let key_points: Vec<String> = (0..40).map(|i| format!("KP-{:02}", i)).collect();
        let raw = json!({
            "title": "Long",
            "summary": "Many points.",
            "key_points": key_points,
            "limitations": ["LIMIT-X"]
        })
        .to_string();
        app.controller
            .state_mut()
            .apply(&PipelineEvent::FinalReport {
                report: Some(report(json!({ "raw_output": raw }))),
            })
            .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("KP-00"));
        assert!(!text.contains("LIMIT-X"));

        for code in [KeyCode::Down, KeyCode::PageDown] {
            for _ in 0..50 {
                app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
                terminal.draw(|f| render(f, &mut app)).unwrap();
            }
        }
        let text = buffer_text(&terminal);
        assert!(text.contains("KP-39"));
        assert!(text.contains("LIMIT-X"));
        assert!(!text.contains("KP-00"));

        for _ in 0..50 {
            app.handle_key_event(KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE));
            terminal.draw(|f| render(f, &mut app)).unwrap();
        }
        assert_eq!(app.output_scroll, 0);
        assert!(buffer_text(&terminal).contains("KP-00"));
    }

    #[tokio::test]
    async fn test_error_banner() {
        let (mut app, _) = test_app();
        app.controller.state_mut().set_error("Stream connection lost.");
        let text = draw(&mut app);
        assert!(text.contains("Stream connection lost."));
    }

    #[tokio::test]
    async fn test_tiny_terminal_does_not_panic() {
        let (mut app, _) = test_app();
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal.draw(|f| render(f, &mut app)).unwrap();
    }
}
