//! Header, query bar, error banner, and footer.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

use super::helpers::format_elapsed;
use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_BORDER_FOCUS, COLOR_DIM, COLOR_ERROR, COLOR_HEADER,
    COLOR_RUNNING, COLOR_TEXT,
};

pub const TITLE: &str = "Multi-Agent Workflow Visualizer";
pub const SUBTITLE: &str = "Real-time execution of a multi-agent pipeline";

pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut status = vec![Span::styled(
        app.controller.endpoint(),
        Style::default().fg(COLOR_DIM),
    )];
    if let Some(run_id) = app.controller.run_id() {
        status.push(Span::styled("  run ", Style::default().fg(COLOR_DIM)));
        status.push(Span::styled(run_id.to_string(), Style::default().fg(COLOR_ACCENT)));
    }
    if let Some(elapsed) = app.controller.elapsed() {
        status.push(Span::styled(
            format!("  {}", format_elapsed(elapsed)),
            Style::default().fg(COLOR_TEXT),
        ));
    }
    status.push(Span::styled(
        format!("  [{}]", app.controller.phase().label()),
        Style::default().fg(COLOR_DIM),
    ));

    let lines = vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(COLOR_DIM))),
        Line::from(status),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn render_query_bar(frame: &mut Frame, area: Rect, app: &App) {
    let running = app.is_running();
    let button = if running {
        "Running..."
    } else {
        "Enter: Run Multi-Agent Workflow"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if running { COLOR_BORDER } else { COLOR_BORDER_FOCUS }))
        .title(" Query ")
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", button),
            Style::default().fg(if running { COLOR_RUNNING } else { COLOR_TEXT }),
        )));

    let text = if app.query.text().is_empty() {
        Span::styled("Enter a research query...", Style::default().fg(COLOR_DIM))
    } else {
        Span::styled(
            app.query.text().to_string(),
            Style::default().fg(if running { COLOR_DIM } else { COLOR_HEADER }),
        )
    };

    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);

    if !running && inner.width > 0 && inner.height > 0 {
        let column = app.query.cursor_column().min(inner.width - 1);
        frame.set_cursor_position(Position::new(inner.x + column, inner.y));
    }
}

pub fn render_error_banner(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_ERROR));
    let banner = Paragraph::new(Span::styled(message.to_string(), Style::default().fg(COLOR_ERROR)))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(banner, area);
}

pub fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(COLOR_DIM);
    let mut spans = vec![
        Span::styled("Enter", key),
        Span::styled(" run  ", dim),
        Span::styled("Ctrl+R", key),
        Span::styled(
            if app.raw_expanded { " hide raw  " } else { " show raw  " },
            dim,
        ),
        Span::styled("↑↓ PgUp PgDn", key),
        Span::styled(" scroll  ", dim),
        Span::styled("Esc", key),
        Span::styled(" quit", dim),
    ];
    if app.is_running() {
        spans.drain(0..2);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
