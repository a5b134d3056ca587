//! Keyboard and paste handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::App;

impl App {
    /// Apply one key press. Releases and repeats from enhanced keyboards are
    /// ignored.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.mark_dirty();

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::Esc => self.quit(),
            KeyCode::Char('r') if ctrl => self.toggle_raw_output(),
            KeyCode::Enter => {
                self.submit_query();
            }
            KeyCode::Up => self.scroll_output_up(1),
            KeyCode::Down => self.scroll_output_down(1),
            KeyCode::PageUp => self.scroll_output_up(self.output_page()),
            KeyCode::PageDown => self.scroll_output_down(self.output_page()),
            // The query is read-only while a run is active
            _ if self.is_running() => {}
            KeyCode::Char('u') if ctrl => self.query.clear(),
            KeyCode::Char(c) if !ctrl => self.query.insert_char(c),
            KeyCode::Backspace => self.query.backspace(),
            KeyCode::Delete => self.query.delete(),
            KeyCode::Left => self.query.move_left(),
            KeyCode::Right => self.query.move_right(),
            KeyCode::Home => self.query.move_home(),
            KeyCode::End => self.query.move_end(),
            _ => {}
        }
    }

    /// Apply a bracketed paste.
    pub fn handle_paste(&mut self, text: &str) {
        if self.is_running() {
            return;
        }
        self.query.insert_str(text);
        self.mark_dirty();
    }
}
