//! Final output panel: structured report, collapsible raw output, or a
//! placeholder.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::cli::report_text::UNSTRUCTURED_NOTICE;
use crate::models::Report;

use super::helpers::{inner_rect, wrapped_line_count};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_RAW, COLOR_TEXT};

pub const WAITING_PLACEHOLDER: &str = "Waiting for agents to complete...";
pub const IDLE_PLACEHOLDER: &str = "Run the workflow to see results here";

pub fn render_output_panel(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            " Final Output ",
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(block, area);
    let inner = inner_rect(area, 1);
    app.output_viewport_height = inner.height;

    let state = app.state();
    let Some(report) = state.report.as_ref() else {
        let placeholder = if state.running {
            WAITING_PLACEHOLDER
        } else {
            IDLE_PLACEHOLDER
        };
        let vertical_pad = inner.height / 2;
        let mut lines = vec![Line::default(); vertical_pad as usize];
        lines.push(Line::from(Span::styled(placeholder, Style::default().fg(COLOR_DIM))));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
        app.output_max_scroll = 0;
        return;
    };

    let lines = report_lines(report, app.raw_expanded);
    let total = wrapped_line_count(&lines, inner.width);
    let max_scroll = u16::try_from(total.saturating_sub(inner.height as usize)).unwrap_or(u16::MAX);
    app.output_max_scroll = max_scroll;
    let scroll = app.output_scroll.min(max_scroll);

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        inner,
    );
}

fn section_heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
    ))
}

/// Lines for a delivered report.
pub(super) fn report_lines(report: &Report, raw_expanded: bool) -> Vec<Line<'static>> {
    let body = Style::default().fg(COLOR_TEXT);
    let mut lines = vec![section_heading("Structured Report"), Line::default()];

    match report.structured() {
        Some(structured) => {
            if let Some(title) = structured.title() {
                lines.push(Line::from(Span::styled(
                    title.to_string(),
                    Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
                )));
            }
            if let Some(summary) = structured.summary() {
                lines.push(Line::from(Span::styled(summary.to_string(), body)));
            }
            for (heading, items) in [
                ("Key Points", structured.key_points()),
                ("Limitations", structured.limitations()),
            ] {
                let Some(items) = items.filter(|items| !items.is_empty()) else {
                    continue;
                };
                lines.push(Line::default());
                lines.push(section_heading(heading));
                lines.extend(
                    items
                        .into_iter()
                        .map(|item| Line::from(Span::styled(format!("  • {}", item), body))),
                );
            }
        }
        None => lines.push(Line::from(Span::styled(
            UNSTRUCTURED_NOTICE,
            Style::default().fg(COLOR_DIM).add_modifier(Modifier::ITALIC),
        ))),
    }

    lines.push(Line::default());
    let marker = if raw_expanded { "▾" } else { "▸" };
    lines.push(section_heading(&format!("{} Raw Model Output (Ctrl+R)", marker)));
    if raw_expanded {
        lines.extend(
            report
                .raw_output()
                .lines()
                .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(COLOR_RAW)))),
        );
    }
    lines
}
