//! Color theme constants for the dashboard
//!
//! A minimal dark palette; status colors follow the agent lifecycle.

use ratatui::style::Color;

// ============================================================================
// Chrome
// ============================================================================

/// Panel borders
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Borders of the focused input
pub const COLOR_BORDER_FOCUS: Color = Color::Gray;

/// Title and section headings
pub const COLOR_HEADER: Color = Color::White;

/// Highlighted values (run id, report title)
pub const COLOR_ACCENT: Color = Color::Rgb(0, 122, 204); // blue #007ACC

/// Secondary text
pub const COLOR_DIM: Color = Color::DarkGray;

/// Body text
pub const COLOR_TEXT: Color = Color::Gray;

// ============================================================================
// Agent status
// ============================================================================

pub const COLOR_IDLE: Color = Color::Gray;

pub const COLOR_RUNNING: Color = Color::Cyan;

pub const COLOR_COMPLETED: Color = Color::Rgb(4, 181, 117); // green #04B575

/// Current tool line on a running agent
pub const COLOR_TOOL: Color = Color::Rgb(128, 128, 128);

// ============================================================================
// Output
// ============================================================================

pub const COLOR_ERROR: Color = Color::Red;

/// Raw model output
pub const COLOR_RAW: Color = Color::LightGreen;
