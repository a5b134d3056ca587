//! Helper functions and constants for UI rendering

use std::time::Duration;

use ratatui::{layout::Rect, text::Line};
use unicode_width::UnicodeWidthStr;

use crate::models::AgentStatus;

/// Spinner animation frames for running agents
pub const SPINNER_FRAMES: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Get inner rect with margin
pub fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

/// Format elapsed time as `12.3s` under a minute, `2m 05s` above.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{:.1}s", elapsed.as_secs_f64())
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

/// Badge icon for an agent status.
pub fn status_icon(status: AgentStatus, spinner_frame: usize) -> char {
    match status {
        AgentStatus::Idle => '○',
        AgentStatus::Running => SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()],
        AgentStatus::Completed => '✓',
    }
}

/// Rows `lines` occupy once word-wrapped to `width` columns.
///
/// Follows the greedy word wrap of a `Paragraph` with `trim: false`; words
/// wider than the row are broken across rows.
pub fn wrapped_line_count(lines: &[Line], width: u16) -> usize {
    let width = width as usize;
    if width == 0 {
        return lines.len();
    }
    lines.iter().map(|line| wrapped_rows(line, width)).sum()
}

fn wrapped_rows(line: &Line, width: usize) -> usize {
    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    let mut rows = 1;
    let mut column = 0;
    for word in text.split_inclusive(' ') {
        let visible = word.trim_end_matches(' ').width();
        let full = word.width();
        if column > 0 && column + visible > width {
            rows += 1;
            column = 0;
        }
        if visible > width {
            rows += (visible - 1) / width;
            column = (visible - 1) % width + 1;
            column += full - visible;
        } else {
            column += full;
        }
        // Whitespace past the edge is swallowed by the wrap
        column = column.min(width);
    }
    rows
}
