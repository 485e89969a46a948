//! One editor surface: buffer, cursor and its suggestion session.
//!
//! The cursor is a char offset kept inside `0..=buffer.len_chars()` by every
//! mutation below. Each editor also owns a classification ticket counter so a
//! deferred classification can tell whether a newer trigger superseded it.

use core_suggest::{EditorKind, Insertion, SuggestionSession};
use core_text::{Buffer, LineCol, motion};
use tracing::trace;

/// Spaces inserted for the Tab key.
pub const TAB_TEXT: &str = "  ";

#[derive(Debug, Clone)]
pub struct EditorState {
    pub kind: EditorKind,
    pub buffer: Buffer,
    cursor: usize,
    pub session: SuggestionSession,
    ticket: u64,
    /// Topmost visible line, maintained by `scroll_to_cursor`.
    pub first_line: usize,
}

impl EditorState {
    pub fn new(kind: EditorKind, content: &str) -> Self {
        let buffer = Buffer::new(kind.label(), content);
        Self {
            kind,
            buffer,
            cursor: 0,
            session: SuggestionSession::new(),
            ticket: 0,
            first_line: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = self.buffer.clamp(pos);
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn text_before_cursor(&self) -> String {
        self.buffer.text_before(self.cursor)
    }

    /// Line/column of the cursor; the suggestion overlay is anchored here.
    pub fn anchor(&self) -> LineCol {
        self.buffer.line_col(self.cursor)
    }

    pub fn insert_char(&mut self, c: char) {
        self.cursor = self.buffer.insert_char(self.cursor, c);
    }

    pub fn insert_str(&mut self, text: &str) {
        self.cursor = self.buffer.insert(self.cursor, text);
    }

    pub fn newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the char before the cursor. Returns false at buffer start.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.buffer.remove(self.cursor - 1..self.cursor);
        self.cursor -= 1;
        true
    }

    /// Delete the char under the cursor. Returns false at buffer end.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.buffer.len_chars() {
            return false;
        }
        self.buffer.remove(self.cursor..self.cursor + 1);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = motion::left(&self.buffer, self.cursor);
    }

    pub fn move_right(&mut self) {
        self.cursor = motion::right(&self.buffer, self.cursor);
    }

    pub fn move_up(&mut self) {
        self.cursor = motion::up(&self.buffer, self.cursor);
    }

    pub fn move_down(&mut self) {
        self.cursor = motion::down(&self.buffer, self.cursor);
    }

    pub fn move_home(&mut self) {
        self.cursor = motion::line_start(&self.buffer, self.cursor);
    }

    pub fn move_end(&mut self) {
        self.cursor = motion::line_end(&self.buffer, self.cursor);
    }

    /// Empty the buffer, reset the cursor and close any open session.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.first_line = 0;
        self.session.close();
    }

    /// Adopt the buffer + cursor produced by a candidate insertion.
    pub fn apply(&mut self, insertion: Insertion) {
        self.buffer = insertion.buffer;
        self.cursor = self.buffer.clamp(insertion.cursor);
    }

    /// Start a new classification round; older tickets become stale.
    pub fn issue_ticket(&mut self) -> u64 {
        self.ticket += 1;
        trace!(target: "suggest.session", editor = self.kind.label(), ticket = self.ticket, "ticket_issued");
        self.ticket
    }

    pub fn current_ticket(&self) -> u64 {
        self.ticket
    }

    /// Scroll so the cursor line is within `height` rows starting at `first_line`.
    pub fn scroll_to_cursor(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        let line = self.anchor().line;
        if line < self.first_line {
            self.first_line = line;
        } else if line >= self.first_line + height {
            self.first_line = line + 1 - height;
        }
    }
}
