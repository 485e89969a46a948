//! Terminal writer abstraction.
//!
//! Collects primitive terminal operations for one frame and emits them in a
//! single flush. Commands preserve ordering; all positions are absolute with a
//! (0,0) origin and the caller ensures bounds.

use crate::style::CellStyle;
use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    ClearLine,
    Style(CellStyle),
    Print(String),
    ShowCursor(u16, u16),
    HideCursor,
}

#[derive(Default, Debug)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }
    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }
    pub fn style(&mut self, style: CellStyle) {
        self.cmds.push(Command::Style(style));
    }
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }
    pub fn show_cursor(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::ShowCursor(x, y));
    }
    pub fn hide_cursor(&mut self) {
        self.cmds.push(Command::HideCursor);
    }
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn flush(self) -> Result<()> {
        let mut out = stdout();
        self.flush_to(&mut out)
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearLine => queue!(out, Clear(ClearType::UntilNewLine))?,
                Command::Style(s) => {
                    queue!(out, SetForegroundColor(s.fg), SetBackgroundColor(s.bg))?;
                    let attr = if s.reverse {
                        Attribute::Reverse
                    } else {
                        Attribute::NoReverse
                    };
                    queue!(out, SetAttribute(attr))?;
                }
                Command::Print(s) => queue!(out, Print(s))?,
                Command::ShowCursor(x, y) => queue!(out, MoveTo(x, y), Show)?,
                Command::HideCursor => queue!(out, Hide)?,
            }
        }
        queue!(out, ResetColor)?;
        out.flush()?;
        Ok(())
    }
}
