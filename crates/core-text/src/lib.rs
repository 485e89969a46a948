//! Rope-based text buffer abstraction.
//!
//! Every position in this crate is a zero-based *character* offset into the
//! whole buffer (not a byte index and not a line/column pair). Valid offsets
//! are `0..=len_chars()`; all entry points clamp out-of-range offsets instead of
//! panicking so callers holding a stale cursor can never index out of bounds.

use ropey::Rope;
use std::fmt;
use std::ops::Range;

pub mod motion;
pub mod width;

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone, Default)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

/// Line/column pair derived from a character offset (both zero-based, column in chars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineCol {
    pub line: usize,
    pub col: usize,
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn new(name: impl Into<String>, content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
            name: name.into(),
        }
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Clamp an offset into `0..=len_chars()`.
    pub fn clamp(&self, idx: usize) -> usize {
        idx.min(self.rope.len_chars())
    }

    /// Total number of lines (an empty buffer has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its trailing newline.
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx >= self.rope.len_lines() {
            return None;
        }
        let mut s = self.rope.line(idx).to_string();
        if s.ends_with('\n') {
            s.pop();
            if s.ends_with('\r') {
                s.pop();
            }
        }
        Some(s)
    }

    /// Char length of a line excluding the newline.
    pub fn line_len(&self, idx: usize) -> usize {
        self.line(idx).map(|l| l.chars().count()).unwrap_or(0)
    }

    /// Offset of the first char of `line` (clamped to the last line).
    pub fn line_start(&self, line: usize) -> usize {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(line)
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        if idx < self.rope.len_chars() {
            Some(self.rope.char(idx))
        } else {
            None
        }
    }

    /// Everything before `idx` (clamped), i.e. the text preceding a cursor.
    pub fn text_before(&self, idx: usize) -> String {
        let idx = self.clamp(idx);
        self.rope.slice(..idx).to_string()
    }

    /// Scan backwards from `idx - 1` and return the offset of the first char matching `pred`.
    pub fn rfind_before<F>(&self, idx: usize, mut pred: F) -> Option<usize>
    where
        F: FnMut(char) -> bool,
    {
        let mut pos = self.clamp(idx);
        let mut chars = self.rope.chars_at(pos);
        while let Some(c) = chars.prev() {
            pos -= 1;
            if pred(c) {
                return Some(pos);
            }
        }
        None
    }

    /// Line/column of an offset, for overlay anchoring and cursor painting.
    pub fn line_col(&self, idx: usize) -> LineCol {
        let idx = self.clamp(idx);
        let line = self.rope.char_to_line(idx);
        let col = idx - self.rope.line_to_char(line);
        LineCol { line, col }
    }

    /// Offset for a line/column, clamping the column to the line length.
    pub fn offset_of(&self, pos: LineCol) -> usize {
        let line = pos.line.min(self.rope.len_lines().saturating_sub(1));
        self.line_start(line) + pos.col.min(self.line_len(line))
    }

    /// Insert `text` at `idx` (clamped); returns the offset just past the inserted text.
    pub fn insert(&mut self, idx: usize, text: &str) -> usize {
        let idx = self.clamp(idx);
        self.rope.insert(idx, text);
        idx + text.chars().count()
    }

    pub fn insert_char(&mut self, idx: usize, c: char) -> usize {
        let idx = self.clamp(idx);
        self.rope.insert_char(idx, c);
        idx + 1
    }

    /// Remove a char range; both ends are clamped and an inverted range is a no-op.
    pub fn remove(&mut self, range: Range<usize>) {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);
        if start < end {
            self.rope.remove(start..end);
        }
    }

    /// Replace a char range with `text`; returns the offset just past the replacement.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> usize {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end).max(start);
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        start + text.chars().count()
    }

    pub fn clear(&mut self) {
        self.rope = Rope::new();
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("name", &self.name)
            .field("len_chars", &self.rope.len_chars())
            .finish()
    }
}
