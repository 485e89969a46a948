//! Terminal front end: frame composition and repaint.
//!
//! A render pass composes the whole screen from playground state
//! ([`frame::compose_frame`]) and then emits only rows that differ from the
//! previous frame. A resize, a theme switch or the very first frame repaints
//! everything. The overlay rectangle painted last is kept for click
//! hit-testing, so a click always maps to the candidate the user saw.

use anyhow::Result;
use bitflags::bitflags;
use core_state::Playground;
use core_terminal::TerminalCapabilities;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, trace};

pub mod frame;
pub mod layout;
pub mod metrics;
pub mod overlay;
pub mod status;
pub mod style;
pub mod writer;

use frame::{Frame, Row, compose_frame};
use layout::Layout;
use metrics::{RenderMetrics, RenderMetricsSnapshot};
use overlay::OverlayRect;
use style::Palette;
use writer::Writer;

bitflags! {
    /// Why a frame repaints every row.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FullRepaint: u8 {
        const FIRST  = 0b0000_0001;
        const RESIZE = 0b0000_0010;
        const THEME  = 0b0000_0100;
        /// Requested by the caller, e.g. after the terminal was handed back.
        const FORCED = 0b0000_1000;
    }
}

pub struct RenderEngine {
    caps: TerminalCapabilities,
    prev: Option<Frame>,
    prev_palette: Option<Palette>,
    forced: bool,
    last_overlay: Option<OverlayRect>,
    metrics: RenderMetrics,
}

impl RenderEngine {
    pub fn new(caps: TerminalCapabilities) -> Self {
        Self {
            caps,
            prev: None,
            prev_palette: None,
            forced: false,
            last_overlay: None,
            metrics: RenderMetrics::default(),
        }
    }

    pub fn capabilities(&self) -> TerminalCapabilities {
        self.caps
    }

    /// Next frame repaints every row.
    pub fn invalidate(&mut self) {
        self.forced = true;
    }

    /// Render to stdout.
    pub fn render(&mut self, pg: &Playground, width: u16, height: u16) -> Result<()> {
        let writer = self.prepare(pg, width, height);
        writer.flush()
    }

    /// Render into an arbitrary sink (used by tests).
    pub fn render_to<W: Write>(
        &mut self,
        pg: &Playground,
        width: u16,
        height: u16,
        out: &mut W,
    ) -> Result<()> {
        let writer = self.prepare(pg, width, height);
        writer.flush_to(out)
    }

    /// Compose the next frame and collect the commands that bring the screen up to date.
    pub fn prepare(&mut self, pg: &Playground, width: u16, height: u16) -> Writer {
        let start = Instant::now();
        let layout = Layout::new(width, height);
        let palette = Palette::new(pg.theme, self.caps);
        let frame = compose_frame(pg, layout);
        let reasons = self.full_repaint_reasons(&frame, palette);

        let mut w = Writer::new();
        w.hide_cursor();
        let mut repainted = 0u64;
        for (y, row) in frame.rows.iter().enumerate() {
            let unchanged = reasons.is_empty()
                && self
                    .prev
                    .as_ref()
                    .and_then(|p| p.rows.get(y))
                    .is_some_and(|old| old == row);
            if unchanged {
                continue;
            }
            emit_row(&mut w, &palette, y as u16, row);
            repainted += 1;
        }
        if let Some((x, y)) = frame.cursor {
            w.show_cursor(x, y);
        }

        use std::sync::atomic::Ordering::Relaxed;
        let skipped = frame.rows.len() as u64 - repainted;
        if reasons.is_empty() {
            self.metrics.partial_frames.fetch_add(1, Relaxed);
        } else {
            self.metrics.full_frames.fetch_add(1, Relaxed);
            debug!(target: "render", reasons = ?reasons, width, height, "full_repaint");
        }
        self.metrics.rows_repainted.fetch_add(repainted, Relaxed);
        self.metrics.rows_skipped.fetch_add(skipped, Relaxed);
        if frame.overlay.is_some() {
            self.metrics.overlay_frames.fetch_add(1, Relaxed);
        }
        let ns = start.elapsed().as_nanos() as u64;
        self.metrics.last_render_ns.store(ns, Relaxed);
        trace!(target: "render", repainted, skipped, ns, overlay = frame.overlay.is_some(), "frame_prepared");

        self.last_overlay = frame.overlay;
        self.prev_palette = Some(palette);
        self.prev = Some(frame);
        self.forced = false;
        w
    }

    fn full_repaint_reasons(&self, frame: &Frame, palette: Palette) -> FullRepaint {
        let mut reasons = FullRepaint::empty();
        match &self.prev {
            None => reasons |= FullRepaint::FIRST,
            Some(prev) if prev.layout != frame.layout => reasons |= FullRepaint::RESIZE,
            Some(_) => {}
        }
        if self.prev_palette.is_some_and(|p| p != palette) {
            reasons |= FullRepaint::THEME;
        }
        if self.forced {
            reasons |= FullRepaint::FORCED;
        }
        reasons
    }

    /// Candidate index under a clicked cell, per the overlay painted last.
    pub fn overlay_hit(&self, column: u16, row: u16) -> Option<usize> {
        self.last_overlay.and_then(|r| r.hit(column, row))
    }

    pub fn last_overlay(&self) -> Option<OverlayRect> {
        self.last_overlay
    }

    pub fn metrics_snapshot(&self) -> RenderMetricsSnapshot {
        self.metrics.snapshot()
    }
}

fn emit_row(w: &mut Writer, palette: &Palette, y: u16, row: &Row) {
    w.move_to(0, y);
    for span in row {
        w.style(palette.style(span.attr));
        w.print(span.text.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Theme;
    use core_events::KeyEvent;
    use core_state::Settings;
    use writer::Command;

    fn engine() -> RenderEngine {
        RenderEngine::new(TerminalCapabilities::from_probe(false, 256))
    }

    fn moves(w: &Writer) -> Vec<u16> {
        w.commands()
            .iter()
            .filter_map(|c| match c {
                Command::MoveTo(0, y) => Some(*y),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn second_frame_repaints_only_changed_rows() {
        let mut pg = Playground::new(Settings::default(), Theme::Light, ["", "", ""]);
        let mut e = engine();
        let first = e.prepare(&pg, 40, 8);
        assert_eq!(moves(&first).len(), 8);

        pg.handle_key(&KeyEvent::char('a'));
        let second = e.prepare(&pg, 40, 8);
        // text row 1 and the status row (column changed)
        assert_eq!(moves(&second), vec![1, 7]);
        let snap = e.metrics_snapshot();
        assert_eq!(snap.full_frames, 1);
        assert_eq!(snap.partial_frames, 1);
    }

    #[test]
    fn resize_and_theme_force_full_repaint() {
        let mut pg = Playground::new(Settings::default(), Theme::Light, ["", "", ""]);
        let mut e = engine();
        e.prepare(&pg, 40, 8);
        assert_eq!(moves(&e.prepare(&pg, 50, 8)).len(), 8);
        pg.theme = Theme::Dark;
        assert_eq!(moves(&e.prepare(&pg, 50, 8)).len(), 8);
        assert_eq!(moves(&e.prepare(&pg, 50, 8)).len(), 0);
        e.invalidate();
        assert_eq!(moves(&e.prepare(&pg, 50, 8)).len(), 8);
    }

    #[test]
    fn overlay_hit_uses_last_painted_rect() {
        let mut pg = Playground::new(Settings::default(), Theme::Light, ["", "", ""]);
        let mut e = engine();
        assert_eq!(e.overlay_hit(3, 2), None);
        pg.handle_key(&KeyEvent::char('<'));
        pg.on_classify_due(0, '<', pg.editors[0].current_ticket());
        e.prepare(&pg, 40, 12);
        let rect = e.last_overlay().expect("overlay");
        assert_eq!(e.overlay_hit(rect.x, rect.y), Some(0));
        assert_eq!(e.overlay_hit(rect.x, rect.y + 1), Some(1));
        assert_eq!(e.overlay_hit(0, 0), None);
    }

    #[test]
    fn render_to_writes_escape_sequences() {
        let pg = Playground::new(Settings::default(), Theme::Dark, ["<p>", "", ""]);
        let mut e = engine();
        let mut out = Vec::new();
        e.render_to(&pg, 30, 5, &mut out).expect("render");
        let s = String::from_utf8_lossy(&out);
        assert!(s.contains("<p>"));
        assert!(s.contains("\u{1b}["));
    }
}
