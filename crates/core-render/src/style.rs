//! Semantic style roles and their concrete terminal colors per theme.
//!
//! Frame composition only tags spans with a [`StyleAttr`]; the writer maps
//! each role to a [`CellStyle`] through the active [`Palette`]. Without color
//! support every role renders with the terminal defaults and emphasis falls
//! back to reverse video.

use core_config::Theme;
use core_terminal::TerminalCapabilities;
use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleAttr {
    Text,
    Gutter,
    TabActive,
    TabInactive,
    Status,
    /// Status line while a confirmation is pending.
    Prompt,
    Overlay,
    /// Highlighted suggestion row.
    OverlayActive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub reverse: bool,
}

impl CellStyle {
    const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            reverse: false,
        }
    }

    const fn plain(reverse: bool) -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
            reverse,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    theme: Theme,
    color: bool,
}

impl Palette {
    pub fn new(theme: Theme, caps: TerminalCapabilities) -> Self {
        Self {
            theme,
            color: caps.supports_color,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn style(&self, attr: StyleAttr) -> CellStyle {
        if !self.color {
            return CellStyle::plain(matches!(
                attr,
                StyleAttr::TabActive
                    | StyleAttr::Status
                    | StyleAttr::Prompt
                    | StyleAttr::OverlayActive
            ));
        }
        match self.theme {
            Theme::Light => match attr {
                StyleAttr::Text => CellStyle::new(Color::Black, Color::White),
                StyleAttr::Gutter => CellStyle::new(Color::DarkGrey, Color::Grey),
                StyleAttr::TabActive => CellStyle::new(Color::White, Color::DarkBlue),
                StyleAttr::TabInactive => CellStyle::new(Color::Black, Color::Grey),
                StyleAttr::Status => CellStyle::new(Color::White, Color::DarkGrey),
                StyleAttr::Prompt => CellStyle::new(Color::White, Color::DarkRed),
                StyleAttr::Overlay => CellStyle::new(Color::Black, Color::Grey),
                StyleAttr::OverlayActive => CellStyle::new(Color::White, Color::DarkBlue),
            },
            Theme::Dark => match attr {
                StyleAttr::Text => CellStyle::new(Color::Grey, Color::Black),
                StyleAttr::Gutter => CellStyle::new(Color::DarkGrey, Color::Black),
                StyleAttr::TabActive => CellStyle::new(Color::Black, Color::Cyan),
                StyleAttr::TabInactive => CellStyle::new(Color::Grey, Color::DarkGrey),
                StyleAttr::Status => CellStyle::new(Color::Black, Color::Grey),
                StyleAttr::Prompt => CellStyle::new(Color::White, Color::DarkRed),
                StyleAttr::Overlay => CellStyle::new(Color::Grey, Color::DarkGrey),
                StyleAttr::OverlayActive => CellStyle::new(Color::Black, Color::Cyan),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_differ_for_text() {
        let caps = TerminalCapabilities::from_probe(false, 256);
        let light = Palette::new(Theme::Light, caps).style(StyleAttr::Text);
        let dark = Palette::new(Theme::Dark, caps).style(StyleAttr::Text);
        assert_ne!(light, dark);
    }

    #[test]
    fn monochrome_uses_reverse_for_emphasis() {
        let p = Palette::new(Theme::Dark, TerminalCapabilities::monochrome());
        assert!(p.style(StyleAttr::OverlayActive).reverse);
        assert!(!p.style(StyleAttr::Overlay).reverse);
        assert_eq!(p.style(StyleAttr::Text).fg, Color::Reset);
    }
}
