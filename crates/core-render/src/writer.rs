//! Frame command buffer.
//!
//! The renderer records terminal operations here and serializes them once,
//! so a frame reaches the terminal as one contiguous byte buffer.
//!
//! * Commands preserve ordering; nothing is emitted mid-frame.
//! * Positions are absolute with a (0,0) origin; callers keep them in bounds.
//! * Consecutive plain prints are merged into one `Print`; any other command
//!   is a batch boundary.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    ClearToEol,
    Print(String),
    Colors { fg: Color, bg: Color },
    Reverse,
    ResetStyle,
    HideCursor,
    ShowCursor,
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
    pending_plain: String,
    pub print_commands: u64,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    fn flush_pending(&mut self) {
        if self.pending_plain.is_empty() {
            return;
        }
        let s = std::mem::take(&mut self.pending_plain);
        self.cmds.push(Command::Print(s));
        self.print_commands += 1;
    }

    fn push(&mut self, cmd: Command) {
        self.flush_pending();
        self.cmds.push(cmd);
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.push(Command::MoveTo(x, y));
    }

    pub fn clear_to_eol(&mut self) {
        self.push(Command::ClearToEol);
    }

    pub fn print(&mut self, s: &str) {
        self.pending_plain.push_str(s);
    }

    pub fn colors(&mut self, fg: Color, bg: Color) {
        self.push(Command::Colors { fg, bg });
    }

    pub fn reverse(&mut self) {
        self.push(Command::Reverse);
    }

    pub fn reset_style(&mut self) {
        self.push(Command::ResetStyle);
    }

    pub fn hide_cursor(&mut self) {
        self.push(Command::HideCursor);
    }

    pub fn show_cursor(&mut self) {
        self.push(Command::ShowCursor);
    }

    #[cfg(test)]
    fn commands(&mut self) -> &[Command] {
        self.flush_pending();
        &self.cmds
    }

    /// Serialize every recorded command into `out`.
    pub fn write_to<W: Write>(mut self, out: &mut W) -> Result<()> {
        self.flush_pending();
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearToEol => queue!(out, Clear(ClearType::UntilNewLine))?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::Colors { fg, bg } => {
                    queue!(out, SetForegroundColor(fg), SetBackgroundColor(bg))?
                }
                Command::Reverse => queue!(out, SetAttribute(Attribute::Reverse))?,
                Command::ResetStyle => queue!(out, SetAttribute(Attribute::Reset))?,
                Command::HideCursor => queue!(out, Hide)?,
                Command::ShowCursor => queue!(out, Show)?,
            }
        }
        Ok(())
    }

    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(4096);
        self.write_to(&mut buf)?;
        Ok(buf)
    }
}
