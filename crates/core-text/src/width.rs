//! Display width helpers.
//!
//! All column math for the terminal front end goes through here so callers
//! never mix char counts with terminal columns. Control chars and other
//! zero-width-unknown chars count as one column (tabs never reach the buffer:
//! the Tab key inserts spaces).

use unicode_width::UnicodeWidthChar;

#[inline]
pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(1)
}

pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Columns occupied by the first `chars` chars of `s`.
pub fn prefix_width(s: &str, chars: usize) -> usize {
    s.chars().take(chars).map(char_width).sum()
}

/// Longest prefix of `s` that fits in `max` columns. A wide char that would straddle the limit is dropped.
pub fn clip_to_width(s: &str, max: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = char_width(c);
        if used + w > max {
            return &s[..idx];
        }
        used += w;
    }
    s
}

/// Portion of `s` starting at column `start`. A wide char split by `start` is skipped.
pub fn skip_columns(s: &str, start: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        if used >= start {
            return &s[idx..];
        }
        used += char_width(c);
    }
    ""
}
