//! Application state for the interactive dashboard.
//!
//! [`App`] wraps the [`StreamController`] with the pieces that only matter on
//! screen: the query editor, the raw-output toggle, the animation tick, and
//! the dirty flag the render loop checks before drawing.

mod handlers;
mod input;

pub use input::QueryInput;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::controller::{ControllerMessage, Handled, StreamController};
use crate::state::DashboardState;
use crate::traits::RunBackend;

/// Ticks per spinner frame (the loop ticks every 16ms).
const TICKS_PER_SPINNER_FRAME: u64 = 8;

pub struct App {
    pub controller: StreamController,
    /// Taken by the render loop so it can be polled in `select!`.
    pub message_rx: Option<mpsc::UnboundedReceiver<ControllerMessage>>,
    pub query: QueryInput,
    /// Whether the raw model output section is expanded
    pub raw_expanded: bool,
    /// Rows scrolled past the top of the output panel
    pub output_scroll: u16,
    /// Largest useful `output_scroll`, persisted by the renderer for clamping
    pub output_max_scroll: u16,
    /// Visible rows of the output panel at the last draw
    pub output_viewport_height: u16,
    pub needs_redraw: bool,
    pub tick_count: u64,
    pub should_quit: bool,
}

impl App {
    pub fn new(backend: Arc<dyn RunBackend>, config: &DashboardConfig) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            controller: StreamController::new(backend, config.registry(), message_tx),
            message_rx: Some(message_rx),
            query: QueryInput::new(config.query.clone()),
            raw_expanded: false,
            output_scroll: 0,
            output_max_scroll: 0,
            output_viewport_height: 0,
            needs_redraw: true,
            tick_count: 0,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &DashboardState {
        self.controller.state()
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    /// Start a run for the current query.
    ///
    /// Returns false without doing anything when the query is blank or a run
    /// is already active.
    pub fn submit_query(&mut self) -> bool {
        if self.is_running() || self.query.is_blank() {
            return false;
        }
        let query = self.query.text().trim().to_string();
        self.raw_expanded = false;
        self.output_scroll = 0;
        self.controller.start_run(&query);
        self.mark_dirty();
        true
    }

    /// Route a message from the network task to the controller.
    pub fn handle_message(&mut self, message: ControllerMessage) {
        if self.controller.handle(message) == Handled::Stale {
            debug!("stale controller message dropped");
            return;
        }
        self.mark_dirty();
    }

    pub fn toggle_raw_output(&mut self) {
        self.raw_expanded = !self.raw_expanded;
        self.mark_dirty();
    }

    pub fn scroll_output_up(&mut self, rows: u16) {
        self.output_scroll = self.output_scroll.saturating_sub(rows);
        self.mark_dirty();
    }

    pub fn scroll_output_down(&mut self, rows: u16) {
        self.output_scroll = self
            .output_scroll
            .saturating_add(rows)
            .min(self.output_max_scroll);
        self.mark_dirty();
    }

    /// One page of the output panel, keeping a row of context.
    pub fn output_page(&self) -> u16 {
        self.output_viewport_height.saturating_sub(1).max(1)
    }

    /// Advance the animation clock. Keeps redrawing while a run is active so
    /// the spinner and elapsed time move.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.is_running() && self.tick_count % TICKS_PER_SPINNER_FRAME == 0 {
            self.mark_dirty();
        }
    }

    /// Index into a four-frame spinner.
    pub fn spinner_frame(&self) -> usize {
        ((self.tick_count / TICKS_PER_SPINNER_FRAME) % 4) as usize
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.controller.shutdown();
        self.should_quit = true;
    }
}
