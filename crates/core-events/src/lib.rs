//! Core event types shared by the input decoder, the session loop and views.
//!
//! Everything here is plain data: no channels, no I/O. The decoder produces
//! `KeyRead` values, the session consumes them, and views only ever observe a
//! `KeyEvent` (never a timeout or end-of-stream marker).
//!
//! Logging policy: `Char` payloads are single bytes the user typed; callers log
//! the discriminant only (`KeyEvent::name`) so raw input never lands in logs.

use std::fmt;

/// Logical key identity decoded from the raw terminal byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// `ESC [ 3 ~`.
    Delete,
    /// Session terminator (`q`, Ctrl-C).
    Quit,
    /// Any byte that does not belong to a recognised sequence.
    Char(u8),
}

impl KeyEvent {
    /// Stable discriminant label used for structured logging.
    pub fn name(&self) -> &'static str {
        match self {
            KeyEvent::Up => "up",
            KeyEvent::Down => "down",
            KeyEvent::Left => "left",
            KeyEvent::Right => "right",
            KeyEvent::Home => "home",
            KeyEvent::End => "end",
            KeyEvent::PageUp => "page_up",
            KeyEvent::PageDown => "page_down",
            KeyEvent::Delete => "delete",
            KeyEvent::Quit => "quit",
            KeyEvent::Char(_) => "char",
        }
    }

    /// True for keys that move the cursor vertically.
    pub fn is_vertical_motion(&self) -> bool {
        matches!(
            self,
            KeyEvent::Up | KeyEvent::Down | KeyEvent::PageUp | KeyEvent::PageDown
        )
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEvent::Char(b) if b.is_ascii_graphic() => write!(f, "'{}'", *b as char),
            KeyEvent::Char(b) => write!(f, "0x{b:02x}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Outcome of a single decode call.
///
/// `Timeout` and `Eof` are deliberately distinct: a timeout only asks the
/// caller to redraw, end-of-stream ends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRead {
    Key(KeyEvent),
    Timeout,
    Eof,
}

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerminalGeometry {
    pub width: u16,
    pub height: u16,
}

impl TerminalGeometry {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Rows left for content once `reserved` rows (status line) are taken.
    pub fn content_rows(&self, reserved: u16) -> u16 {
        self.height.saturating_sub(reserved)
    }
}

impl fmt::Display for TerminalGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_hides_non_printable_bytes() {
        assert_eq!(KeyEvent::Char(b'Z').to_string(), "'Z'");
        assert_eq!(KeyEvent::Char(0x1b).to_string(), "0x1b");
        assert_eq!(KeyEvent::PageDown.to_string(), "page_down");
    }

    #[test]
    fn vertical_motion_classification() {
        assert!(KeyEvent::Up.is_vertical_motion());
        assert!(KeyEvent::PageDown.is_vertical_motion());
        assert!(!KeyEvent::Home.is_vertical_motion());
        assert!(!KeyEvent::Char(b'j').is_vertical_motion());
    }

    #[test]
    fn content_rows_saturates() {
        let g = TerminalGeometry::new(80, 1);
        assert_eq!(g.content_rows(1), 0);
        assert_eq!(g.content_rows(3), 0);
        assert_eq!(TerminalGeometry::new(80, 24).content_rows(1), 23);
    }
}
