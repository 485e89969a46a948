//! Cursor motion helpers.
//!
//! These operate purely on a `Buffer` + char offset pair and are free of editor state.
//! Vertical motion keeps the column when the target line is long enough, else clamps to its end.

use crate::{Buffer, LineCol};

pub fn left(buf: &Buffer, pos: usize) -> usize {
    buf.clamp(pos).saturating_sub(1)
}

pub fn right(buf: &Buffer, pos: usize) -> usize {
    buf.clamp(pos.saturating_add(1))
}

pub fn line_start(buf: &Buffer, pos: usize) -> usize {
    let lc = buf.line_col(pos);
    buf.line_start(lc.line)
}

pub fn line_end(buf: &Buffer, pos: usize) -> usize {
    let lc = buf.line_col(pos);
    buf.line_start(lc.line) + buf.line_len(lc.line)
}

pub fn up(buf: &Buffer, pos: usize) -> usize {
    let lc = buf.line_col(pos);
    if lc.line == 0 {
        return buf.line_start(0);
    }
    buf.offset_of(LineCol {
        line: lc.line - 1,
        col: lc.col,
    })
}

pub fn down(buf: &Buffer, pos: usize) -> usize {
    let lc = buf.line_col(pos);
    if lc.line + 1 >= buf.line_count() {
        return line_end(buf, pos);
    }
    buf.offset_of(LineCol {
        line: lc.line + 1,
        col: lc.col,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf() -> Buffer {
        Buffer::new("t", "div {\n  a\n}")
    }

    #[test]
    fn horizontal_motions_clamp() {
        let b = buf();
        assert_eq!(left(&b, 0), 0);
        assert_eq!(right(&b, b.len_chars()), b.len_chars());
        assert_eq!(right(&b, 2), 3);
    }

    #[test]
    fn vertical_motion_clamps_column() {
        let b = buf();
        // from col 4 on line 0 to line 1 ("  a" has 3 chars)
        let p = down(&b, 4);
        assert_eq!(b.line_col(p), LineCol { line: 1, col: 3 });
        let back = up(&b, p);
        assert_eq!(b.line_col(back), LineCol { line: 0, col: 3 });
    }

    #[test]
    fn vertical_motion_at_edges() {
        let b = buf();
        assert_eq!(up(&b, 3), 0);
        assert_eq!(down(&b, b.len_chars() - 1), b.len_chars());
    }

    #[test]
    fn line_start_and_end() {
        let b = buf();
        assert_eq!(line_start(&b, 8), 6);
        assert_eq!(line_end(&b, 7), 9);
    }
}
