//! Terminal capability probing.
//!
//! Detection runs once at startup. The renderer consults `supports_color` to
//! pick between themed colors and a monochrome fallback (reverse video for
//! the highlighted suggestion, no background fills).

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    pub supports_color: bool,
}

impl TerminalCapabilities {
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        let colors = crossterm::style::available_color_count();
        let caps = Self::from_probe(no_color, colors);
        debug!(target: "render", colors, no_color, supports_color = caps.supports_color, "terminal_capabilities");
        caps
    }

    /// Decide capabilities from raw probe results.
    pub fn from_probe(no_color: bool, available_colors: u16) -> Self {
        Self {
            supports_color: !no_color && available_colors >= 8,
        }
    }

    pub fn monochrome() -> Self {
        Self {
            supports_color: false,
        }
    }
}
