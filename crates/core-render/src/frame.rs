//! Frame composition: turns playground state into styled rows.
//!
//! Every row is padded to exactly the layout width so emission never needs to
//! clear leftovers from a previous frame. Composition is pure; the engine in
//! `lib.rs` decides which rows actually reach the terminal.

use crate::layout::Layout;
use crate::overlay::{OverlayRect, overlay_rows, place_overlay};
use crate::status::{StatusContext, build_status};
use crate::style::StyleAttr;
use core_state::{Playground, View};
use core_text::width::{clip_to_width, prefix_width, skip_columns, str_width};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub attr: StyleAttr,
}

impl Span {
    pub fn new(text: impl Into<String>, attr: StyleAttr) -> Self {
        Self {
            text: text.into(),
            attr,
        }
    }

    fn width(&self) -> usize {
        str_width(&self.text)
    }
}

pub type Row = Vec<Span>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub layout: Layout,
    pub rows: Vec<Row>,
    /// Terminal cursor cell, shown only while an editor has focus.
    pub cursor: Option<(u16, u16)>,
    pub overlay: Option<OverlayRect>,
}

impl Frame {
    /// Plain text of a row, for tests and logging.
    pub fn row_text(&self, y: usize) -> String {
        self.rows
            .get(y)
            .map(|r| r.iter().map(|s| s.text.as_str()).collect())
            .unwrap_or_default()
    }
}

pub fn compose_frame(pg: &Playground, layout: Layout) -> Frame {
    let mut frame = Frame {
        layout,
        rows: Vec::with_capacity(usize::from(layout.height)),
        cursor: None,
        overlay: None,
    };
    if !layout.is_usable() {
        return frame;
    }
    frame.rows.push(tab_bar(pg.view, layout.width));

    let height = usize::from(layout.text_height());
    match pg.view {
        View::Editor(kind) => {
            let ed = pg.editor(kind);
            let anchor = ed.anchor();
            let first = visible_first_line(ed.first_line, anchor.line, height);
            let lines: Vec<String> = (first..first + height)
                .map_while(|i| ed.buffer.line(i))
                .collect();
            paint_text(
                &mut frame.rows,
                &lines,
                first,
                ed.buffer.line_count(),
                layout,
            );

            let gutter = usize::from(Layout::gutter_columns(ed.buffer.line_count()));
            let line_text = ed.buffer.line(anchor.line).unwrap_or_default();
            let x = (gutter + prefix_width(&line_text, anchor.col))
                .min(usize::from(layout.width).saturating_sub(1));
            let y = usize::from(layout.text_top()) + anchor.line - first;
            let cursor = (x as u16, y as u16);
            frame.cursor = Some(cursor);

            if ed.session.is_visible()
                && let Some(rect) = place_overlay(
                    ed.session.candidates(),
                    ed.session.active_index(),
                    cursor,
                    &layout,
                )
            {
                for (i, (label, active)) in
                    overlay_rows(ed.session.candidates(), ed.session.active_index(), &rect)
                        .into_iter()
                        .enumerate()
                {
                    let attr = if active {
                        StyleAttr::OverlayActive
                    } else {
                        StyleAttr::Overlay
                    };
                    let y = usize::from(rect.y) + i;
                    let row = std::mem::take(&mut frame.rows[y]);
                    frame.rows[y] = splice(row, usize::from(rect.x), Span::new(label, attr));
                }
                frame.overlay = Some(rect);
            }
        }
        View::Preview => {
            let total = pg.preview().lines().count();
            let lines: Vec<String> = pg
                .preview()
                .lines()
                .skip(pg.preview_scroll)
                .take(height)
                .map(str::to_string)
                .collect();
            paint_text(&mut frame.rows, &lines, pg.preview_scroll, total, layout);
        }
    }

    let (status, attr) = status_line(pg);
    frame.rows.push(vec![pad(clip(&status, layout.width), layout.width, attr)]);
    frame
}

/// Keep `cursor_line` inside a window of `height` rows, starting from the stored scroll origin.
fn visible_first_line(stored: usize, cursor_line: usize, height: usize) -> usize {
    if height == 0 {
        return cursor_line;
    }
    if cursor_line < stored {
        cursor_line
    } else if cursor_line >= stored + height {
        cursor_line + 1 - height
    } else {
        stored
    }
}

fn tab_bar(active: View, width: u16) -> Row {
    let mut row = Vec::with_capacity(View::ORDER.len() + 1);
    let mut used = 0usize;
    for (i, view) in View::ORDER.iter().enumerate() {
        let label = format!(" F{} {} ", i + 1, view.label());
        let attr = if *view == active {
            StyleAttr::TabActive
        } else {
            StyleAttr::TabInactive
        };
        let room = usize::from(width).saturating_sub(used);
        let clipped = clip_to_width(&label, room);
        used += str_width(clipped);
        row.push(Span::new(clipped, attr));
    }
    row.push(Span::new(
        " ".repeat(usize::from(width).saturating_sub(used)),
        StyleAttr::TabInactive,
    ));
    row
}

/// Gutter + text rows for the text area; rows past the last line are blank.
fn paint_text(rows: &mut Vec<Row>, lines: &[String], first: usize, total: usize, layout: Layout) {
    let gutter = usize::from(Layout::gutter_columns(total));
    let digits = gutter - 1;
    let text_cols = usize::from(layout.width).saturating_sub(gutter);
    for r in 0..usize::from(layout.text_height()) {
        let mut row = Vec::with_capacity(2);
        let number = match lines.get(r) {
            Some(_) => format!("{:>digits$} ", first + r + 1),
            None => " ".repeat(gutter),
        };
        row.push(Span::new(
            clip_to_width(&number, usize::from(layout.width)),
            StyleAttr::Gutter,
        ));
        let text = lines.get(r).map(String::as_str).unwrap_or("");
        let clipped = clip_to_width(text, text_cols);
        let fill = text_cols.saturating_sub(str_width(clipped));
        row.push(Span::new(
            format!("{clipped}{}", " ".repeat(fill)),
            StyleAttr::Text,
        ));
        rows.push(row);
    }
}

fn status_line(pg: &Playground) -> (String, StyleAttr) {
    let (position, suggestions) = match pg.active_editor() {
        Some(ed) => {
            let a = ed.anchor();
            (Some((a.line, a.col)), ed.session.len())
        }
        None => (None, 0),
    };
    let ctx = StatusContext {
        view: pg.view.label(),
        position,
        suggestions,
        theme: pg.theme,
        message: pg.ephemeral_status.as_ref().map(|m| m.text.as_str()),
        confirm_clear: pg.confirm_clear,
    };
    let attr = if pg.confirm_clear {
        StyleAttr::Prompt
    } else {
        StyleAttr::Status
    };
    (build_status(&ctx), attr)
}

fn clip(s: &str, width: u16) -> &str {
    clip_to_width(s, usize::from(width))
}

fn pad(s: &str, width: u16, attr: StyleAttr) -> Span {
    let fill = usize::from(width).saturating_sub(str_width(s));
    Span::new(format!("{s}{}", " ".repeat(fill)), attr)
}

/// Overwrite the columns `[x, x + width(patch))` of `row` with `patch`.
fn splice(row: Row, x: usize, patch: Span) -> Row {
    let end = x + patch.width();
    let mut out = Vec::with_capacity(row.len() + 2);
    let mut col = 0usize;
    let mut inserted = false;
    for span in row {
        let w = span.width();
        let (start, stop) = (col, col + w);
        col = stop;
        if stop <= x || start >= end {
            if start >= end && !inserted {
                out.push(patch.clone());
                inserted = true;
            }
            out.push(span);
            continue;
        }
        if start < x {
            let head = clip_to_width(&span.text, x - start);
            out.push(Span::new(head, span.attr));
        }
        if !inserted {
            out.push(patch.clone());
            inserted = true;
        }
        if stop > end {
            let tail = skip_columns(&span.text, end - start);
            out.push(Span::new(tail, span.attr));
        }
    }
    if !inserted {
        out.push(patch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Theme;
    use core_state::Settings;
    use core_suggest::EditorKind;

    fn playground(markup: &str) -> Playground {
        Playground::new(Settings::default(), Theme::Light, [markup, "", ""])
    }

    #[test]
    fn rows_are_padded_to_width() {
        let pg = playground("<p>hi</p>\nsecond");
        let frame = compose_frame(&pg, Layout::new(30, 6));
        assert_eq!(frame.rows.len(), 6);
        for y in 0..6 {
            assert_eq!(str_width(&frame.row_text(y)), 30, "row {y}");
        }
        assert!(frame.row_text(0).contains("F1 markup"));
        assert_eq!(frame.row_text(1).trim_end(), "1 <p>hi</p>");
        assert_eq!(frame.row_text(2).trim_end(), "2 second");
        assert!(frame.row_text(5).starts_with(" MARKUP | Ln 1, Col 1"));
        assert_eq!(frame.cursor, Some((2, 1)));
    }

    #[test]
    fn overlay_is_spliced_below_cursor() {
        let mut pg = playground("");
        pg.editor_mut(EditorKind::Markup).insert_char('<');
        pg.on_classify_due(0, '<', 0);
        let frame = compose_frame(&pg, Layout::new(40, 12));
        let rect = frame.overlay.expect("overlay placed");
        assert_eq!(rect.y, 2);
        assert_eq!(rect.x, 3);
        let first = frame.row_text(2);
        assert!(first.contains(" div>"), "{first:?}");
        assert_eq!(str_width(&first), 40);
        assert!(
            frame.rows[2]
                .iter()
                .any(|s| s.attr == StyleAttr::OverlayActive)
        );
    }

    #[test]
    fn preview_view_shows_document() {
        let mut pg = playground("<b>x</b>");
        pg.switch_view(View::Preview);
        let frame = compose_frame(&pg, Layout::new(60, 10));
        assert!(frame.row_text(1).contains("<!DOCTYPE html>"));
        assert!(frame.cursor.is_none());
        assert!(frame.row_text(9).starts_with(" PREVIEW"));
    }

    #[test]
    fn confirmation_prompt_styles_status() {
        let mut pg = playground("");
        pg.confirm_clear = true;
        let frame = compose_frame(&pg, Layout::new(40, 5));
        let status = &frame.rows[4][0];
        assert_eq!(status.attr, StyleAttr::Prompt);
        assert!(status.text.contains("Clear all editors?"));
    }

    #[test]
    fn splice_cuts_through_spans() {
        let row = vec![
            Span::new("ab", StyleAttr::Gutter),
            Span::new("cdefgh", StyleAttr::Text),
        ];
        let out = splice(row, 1, Span::new("XYZ", StyleAttr::Overlay));
        let text: String = out.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "aXYZefgh");
        assert_eq!(out[1].attr, StyleAttr::Overlay);
    }

    #[test]
    fn tiny_terminal_yields_empty_frame() {
        let frame = compose_frame(&playground("x"), Layout::new(10, 2));
        assert!(frame.rows.is_empty());
    }

    #[test]
    fn cursor_window_follows_cursor() {
        assert_eq!(visible_first_line(0, 30, 10), 21);
        assert_eq!(visible_first_line(25, 3, 10), 3);
        assert_eq!(visible_first_line(5, 7, 10), 5);
    }
}
