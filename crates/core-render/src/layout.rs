//! Screen layout: tab bar on the first row, status line on the last, text in between.

use core_preview::gutter_width;

/// Minimum terminal rows for a usable layout (tab bar + one text row + status line).
pub const MIN_ROWS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
}

impl Layout {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn is_usable(&self) -> bool {
        self.height >= MIN_ROWS && self.width > 0
    }

    pub const fn tab_row(&self) -> u16 {
        0
    }

    /// First screen row of the text area.
    pub const fn text_top(&self) -> u16 {
        1
    }

    /// Rows available for buffer text.
    pub fn text_height(&self) -> u16 {
        self.height.saturating_sub(2)
    }

    pub fn status_row(&self) -> u16 {
        self.height.saturating_sub(1)
    }

    /// Columns taken by the line-number gutter, including its trailing space.
    pub fn gutter_columns(line_count: usize) -> u16 {
        u16::try_from(gutter_width(line_count) + 1).unwrap_or(u16::MAX)
    }
}
