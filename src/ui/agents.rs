//! Agent execution panel.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::{AgentInfo, AgentStatus};

use super::helpers::status_icon;
use super::theme::{
    COLOR_BORDER, COLOR_COMPLETED, COLOR_DIM, COLOR_HEADER, COLOR_IDLE, COLOR_RUNNING, COLOR_TOOL,
};

/// Border plus badge line plus tool line.
const CARD_HEIGHT: u16 = 4;

pub fn render_agent_panel(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            " Multi-Agent Execution ",
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let agents = &app.state().agents;
    let mut constraints: Vec<Constraint> =
        agents.iter().map(|_| Constraint::Length(CARD_HEIGHT)).collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::vertical(constraints).split(inner);

    for (agent, row) in agents.iter().zip(rows.iter()) {
        render_agent_card(frame, *row, agent, app.spinner_frame());
    }
}

fn status_color(status: AgentStatus) -> Color {
    match status {
        AgentStatus::Idle => COLOR_IDLE,
        AgentStatus::Running => COLOR_RUNNING,
        AgentStatus::Completed => COLOR_COMPLETED,
    }
}

fn render_agent_card(frame: &mut Frame, area: Rect, agent: &AgentInfo, spinner_frame: usize) {
    let color = status_color(agent.status);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if agent.status == AgentStatus::Idle {
            COLOR_BORDER
        } else {
            color
        }))
        .title(Span::styled(
            format!(" {} ", agent.name),
            Style::default().fg(COLOR_HEADER),
        ));

    let mut lines = vec![Line::from(Span::styled(
        format!("{} {}", status_icon(agent.status, spinner_frame), agent.status.label()),
        Style::default().fg(color),
    ))];
    match agent.visible_tool() {
        Some(tool) => lines.push(Line::from(vec![
            Span::styled("Tool: ", Style::default().fg(COLOR_DIM)),
            Span::styled(tool.to_string(), Style::default().fg(COLOR_TOOL)),
        ])),
        None => lines.push(Line::default()),
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
