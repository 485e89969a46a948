//! Suggestion overlay geometry.
//!
//! The overlay opens on the row below the cursor, starting at the cursor
//! column, and flips above the cursor when the text area has no room below.
//! At most `MAX_OVERLAY_ROWS` entries are visible; the window scrolls so the
//! highlighted entry always stays inside it. The same rectangle serves click
//! hit-testing, so what is painted and what is clickable never disagree.

use crate::layout::Layout;
use core_text::width::{clip_to_width, str_width};

pub const MAX_OVERLAY_ROWS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    /// Candidate index shown on the first overlay row.
    pub first_index: usize,
}

impl OverlayRect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }

    /// Candidate index under a screen cell.
    pub fn hit(&self, column: u16, row: u16) -> Option<usize> {
        self.contains(column, row)
            .then(|| self.first_index + usize::from(row - self.y))
    }
}

/// Compute where the overlay goes for a cursor at screen cell `cursor`.
pub fn place_overlay(
    candidates: &[String],
    active: Option<usize>,
    cursor: (u16, u16),
    layout: &Layout,
) -> Option<OverlayRect> {
    if candidates.is_empty() || !layout.is_usable() {
        return None;
    }
    let (cx, cy) = cursor;
    let top = layout.text_top();
    let bottom = top + layout.text_height();
    let below = usize::from(bottom.saturating_sub(cy.saturating_add(1)));
    let above = usize::from(cy.saturating_sub(top));
    let wanted = candidates.len().min(MAX_OVERLAY_ROWS);

    let (rows, y) = if wanted <= below {
        (wanted, cy + 1)
    } else if wanted <= above {
        (wanted, cy - wanted as u16)
    } else if below >= above {
        (below, cy + 1)
    } else {
        (above, cy - above as u16)
    };
    if rows == 0 {
        return None;
    }

    let longest = candidates.iter().map(|c| str_width(c)).max().unwrap_or(0);
    let width = u16::try_from(longest + 2)
        .unwrap_or(u16::MAX)
        .min(layout.width);
    let x = cx.min(layout.width - width);

    let first_index = match active {
        Some(a) if a >= rows => a + 1 - rows,
        _ => 0,
    };
    Some(OverlayRect {
        x,
        y,
        width,
        height: rows as u16,
        first_index,
    })
}

/// Padded row labels for the visible window, paired with "is highlighted".
pub fn overlay_rows(
    candidates: &[String],
    active: Option<usize>,
    rect: &OverlayRect,
) -> Vec<(String, bool)> {
    let width = usize::from(rect.width);
    candidates
        .iter()
        .enumerate()
        .skip(rect.first_index)
        .take(usize::from(rect.height))
        .map(|(idx, c)| {
            let inner = clip_to_width(c, width.saturating_sub(2));
            let pad = width.saturating_sub(str_width(inner) + 1);
            (format!(" {inner}{}", " ".repeat(pad)), active == Some(idx))
        })
        .collect()
}
