//! Render path counters.
//!
//! Atomics so the runtime can snapshot them from a log line without borrowing
//! the engine mutably.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RenderMetrics {
    /// Frames where every row was repainted (first frame, resize, theme change).
    pub full_frames: AtomicU64,
    /// Frames that repainted only rows whose content changed.
    pub partial_frames: AtomicU64,
    pub rows_repainted: AtomicU64,
    /// Rows skipped because they matched the previous frame.
    pub rows_skipped: AtomicU64,
    pub overlay_frames: AtomicU64,
    pub last_render_ns: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderMetricsSnapshot {
    pub full_frames: u64,
    pub partial_frames: u64,
    pub rows_repainted: u64,
    pub rows_skipped: u64,
    pub overlay_frames: u64,
    pub last_render_ns: u64,
}

impl RenderMetrics {
    pub fn snapshot(&self) -> RenderMetricsSnapshot {
        RenderMetricsSnapshot {
            full_frames: self.full_frames.load(Ordering::Relaxed),
            partial_frames: self.partial_frames.load(Ordering::Relaxed),
            rows_repainted: self.rows_repainted.load(Ordering::Relaxed),
            rows_skipped: self.rows_skipped.load(Ordering::Relaxed),
            overlay_frames: self.overlay_frames.load(Ordering::Relaxed),
            last_render_ns: self.last_render_ns.load(Ordering::Relaxed),
        }
    }
}
