//! Single-line query editor.

use unicode_width::UnicodeWidthStr;

/// Query text with a cursor measured in chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryInput {
    text: String,
    cursor: usize,
}

impl QueryInput {
    /// Create an input holding `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Terminal columns between the start of the text and the cursor.
    pub fn cursor_column(&self) -> u16 {
        let width = self.text[..self.byte_offset()].width();
        u16::try_from(width).unwrap_or(u16::MAX)
    }

    pub fn insert_char(&mut self, c: char) {
        let offset = self.byte_offset();
        self.text.insert(offset, c);
        self.cursor += 1;
    }

    /// Insert pasted text. Line breaks become spaces.
    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '\r' => {}
                '\n' | '\t' => self.insert_char(' '),
                c => self.insert_char(c),
            }
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let offset = self.byte_offset();
        self.text.remove(offset);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let offset = self.byte_offset();
            self.text.remove(offset);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_offset(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}
