//! Core event types and channel helpers for Livepad.
//!
//! The runtime consumes a single bounded mpsc channel. Producers are the async
//! input task (keys, mouse, resize) and the deferred timers in [`timer`]
//! (classification requests and preview regeneration). Every event is handled
//! on the one event loop, so no state behind these types is shared across
//! threads.

use std::fmt;
use std::sync::atomic::AtomicU64;

pub mod timer;
pub use timer::{Debouncer, ScheduledTask, schedule};

// -------------------------------------------------------------------------------------------------
// Channel Policy
// -------------------------------------------------------------------------------------------------
// Bounded channel sized by `EVENT_CHANNEL_CAP`. Producers await `send` so bursts of typing apply
// backpressure instead of dropping keystrokes. Timer tasks stop silently when the channel closes.
// -------------------------------------------------------------------------------------------------
pub const EVENT_CHANNEL_CAP: usize = 1024;

// -------------------------------------------------------------------------------------------------
// Telemetry
// -------------------------------------------------------------------------------------------------
pub static CHANNEL_SEND_FAILURES: AtomicU64 = AtomicU64::new(0);
pub static KEYPRESS_TOTAL: AtomicU64 = AtomicU64::new(0);
pub static TIMERS_SCHEDULED: AtomicU64 = AtomicU64::new(0);
pub static TIMERS_CANCELLED: AtomicU64 = AtomicU64::new(0); // explicit cancels (supersede / debounce restart)
pub static ASYNC_INPUT_STARTS: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_SIGNAL: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_CHANNEL: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_STREAM: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_ERROR: AtomicU64 = AtomicU64::new(0);

/// Top-level event enum consumed by the central event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(InputEvent),
    /// A deferred classification fired. `slot` is the editor index, `trigger` the character that
    /// requested it and `ticket` the per-editor sequence number issued when it was scheduled.
    ClassifyDue {
        slot: usize,
        trigger: char,
        ticket: u64,
    },
    /// The preview debounce elapsed without further edits.
    PreviewDue,
    Shutdown,
}

/// Normalized input events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Pointer press at a terminal cell (column, row).
    Click { column: u16, row: u16 },
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
    /// Bracketed paste delivered as one block of text.
    Paste(String),
    /// Synthetic interrupt (Ctrl-C) surfaced distinctly from ordinary chords.
    CtrlC,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified key press.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Printable character; shifted punctuation such as `<` or `:` arrives here already resolved.
    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    /// True when CTRL or ALT is held; such chords never count as text input.
    pub fn is_chord(&self) -> bool {
        self.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT)
    }
}

/// KeyCode enumerates normalized logical key representations consumed by higher layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    F(u8),
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_display() {
        let k = KeyEvent::ctrl('x');
        let s = format!("{}", k);
        assert!(s.contains("Char"));
        assert!(s.contains("CTRL"));
    }

    #[test]
    fn shift_is_not_a_chord() {
        let lt = KeyEvent::new(KeyCode::Char('<'), KeyModifiers::SHIFT);
        assert!(!lt.is_chord());
        assert!(KeyEvent::ctrl('q').is_chord());
        assert!(KeyEvent::new(KeyCode::Char('.'), KeyModifiers::ALT).is_chord());
    }

    #[test]
    fn plain_constructors_have_no_modifiers() {
        assert_eq!(KeyEvent::char('a').mods, KeyModifiers::empty());
        assert_eq!(KeyEvent::plain(KeyCode::Down).code, KeyCode::Down);
    }
}
