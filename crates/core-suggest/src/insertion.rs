//! Insertion engine: splice a chosen candidate over the text typed since the last trigger char.
//!
//! The replaced span is `(i + 1)..cursor` where `i` is the offset of the nearest
//! trigger char (`<`, `.`, `:`, space) before the cursor, or the buffer start
//! when there is none. The engine does not know which catalog the candidate
//! came from and does not check that the span still matches the classified
//! context.

use crate::TriggerChar;
use core_text::Buffer;
use std::ops::Range;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Insertion {
    pub buffer: Buffer,
    pub cursor: usize,
}

/// Span that a candidate chosen at `cursor` would replace. The cursor is clamped first.
pub fn replacement_range(buffer: &Buffer, cursor: usize) -> Range<usize> {
    let cursor = buffer.clamp(cursor);
    let start = buffer
        .rfind_before(cursor, TriggerChar::is_trigger)
        .map_or(0, |i| i + 1);
    start..cursor
}

/// Pure: returns the new buffer and cursor; `buffer` is left untouched.
pub fn insert(buffer: &Buffer, cursor: usize, chosen: &str) -> Insertion {
    let range = replacement_range(buffer, cursor);
    let mut next = buffer.clone();
    let replaced = range.len();
    let cursor = next.replace(range.clone(), chosen);
    debug!(
        target: "suggest.insert",
        start = range.start,
        replaced,
        inserted = chosen.chars().count(),
        cursor,
        "candidate_inserted"
    );
    Insertion {
        buffer: next,
        cursor,
    }
}
