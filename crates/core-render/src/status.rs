//! Status line composition.
//!
//! Two stages: `compose_status` produces ordered `StatusSegment`s from a small
//! context DTO and `format_status` renders them into the final string. A
//! pending clear confirmation replaces everything else with its prompt.

use core_config::Theme;

pub const CLEAR_PROMPT: &str = "Clear all editors? (y/n)";

/// What the status line needs to know about the playground.
pub struct StatusContext<'a> {
    pub view: &'static str,
    /// Zero-based cursor position; `None` in the preview view.
    pub position: Option<(usize, usize)>,
    pub suggestions: usize,
    pub theme: Theme,
    pub message: Option<&'a str>,
    pub confirm_clear: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    View(&'static str),
    /// 1-based line and column.
    Position { line_1: usize, col_1: usize },
    Suggestions(usize),
    Theme(Theme),
    Message(&'a str),
    Prompt(&'static str),
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    if ctx.confirm_clear {
        return vec![StatusSegment::Prompt(CLEAR_PROMPT)];
    }
    let mut out = Vec::with_capacity(5);
    out.push(StatusSegment::View(ctx.view));
    if let Some((line, col)) = ctx.position {
        out.push(StatusSegment::Position {
            line_1: line + 1,
            col_1: col + 1,
        });
    }
    if ctx.suggestions > 0 {
        out.push(StatusSegment::Suggestions(ctx.suggestions));
    }
    out.push(StatusSegment::Theme(ctx.theme));
    if let Some(msg) = ctx.message {
        out.push(StatusSegment::Message(msg));
    }
    out
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    use std::fmt::Write as _;
    let mut s = String::with_capacity(64);
    for seg in segments {
        if !s.is_empty() {
            s.push_str(" | ");
        } else {
            s.push(' ');
        }
        let _ = match seg {
            StatusSegment::View(v) => write!(s, "{}", v.to_ascii_uppercase()),
            StatusSegment::Position { line_1, col_1 } => write!(s, "Ln {line_1}, Col {col_1}"),
            StatusSegment::Suggestions(1) => write!(s, "1 suggestion"),
            StatusSegment::Suggestions(n) => write!(s, "{n} suggestions"),
            StatusSegment::Theme(t) => write!(s, "{t}"),
            StatusSegment::Message(m) => write!(s, "{m}"),
            StatusSegment::Prompt(p) => write!(s, "{p}"),
        };
    }
    s
}

pub fn build_status(ctx: &StatusContext<'_>) -> String {
    format_status(&compose_status(ctx))
}
