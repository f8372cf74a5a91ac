//! Vertical viewport and cursor over the row sequence.
//!
//! Guarantees after every public mutator:
//! * `cursor_line < max(1, row_count)`.
//! * `scroll_offset <= cursor_line < scroll_offset + visible_rows`.
//!
//! `visible_rows` is clamped to at least one row so the second guarantee is
//! satisfiable on a terminal with no room for content. Only vertical motion
//! keys move the cursor; horizontal keys are accepted and ignored.

use core_events::KeyEvent;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    cursor_line: usize,
    scroll_offset: usize,
    visible_rows: usize,
    visible_columns: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            cursor_line: 0,
            scroll_offset: 0,
            visible_rows: 1,
            visible_columns: 0,
        }
    }

    pub fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Width the rows are laid out in.
    pub fn visible_columns(&self) -> usize {
        self.visible_columns
    }

    /// Adopt new dimensions and re-establish the scroll invariant.
    pub fn resize(&mut self, rows: usize, columns: usize) {
        self.visible_rows = rows.max(1);
        self.visible_columns = columns;
        self.scroll();
    }

    /// Apply one key. Returns `true` when the cursor line changed.
    pub fn apply(&mut self, key: KeyEvent, row_count: usize) -> bool {
        let before = self.cursor_line;
        match key {
            KeyEvent::Up => self.up(),
            KeyEvent::Down => self.down(row_count),
            KeyEvent::PageUp => {
                self.cursor_line = self.scroll_offset;
                for _ in 0..self.visible_rows {
                    self.up();
                }
            }
            KeyEvent::PageDown => {
                if row_count > 0 {
                    self.cursor_line =
                        (self.scroll_offset + self.visible_rows - 1).min(row_count - 1);
                    for _ in 0..self.visible_rows {
                        self.down(row_count);
                    }
                }
            }
            KeyEvent::Left
            | KeyEvent::Right
            | KeyEvent::Home
            | KeyEvent::End
            | KeyEvent::Delete
            | KeyEvent::Quit
            | KeyEvent::Char(_) => {}
        }
        self.scroll();
        self.cursor_line != before
    }

    fn up(&mut self) {
        if self.cursor_line > 0 {
            self.cursor_line -= 1;
        }
    }

    fn down(&mut self, row_count: usize) {
        if self.cursor_line + 1 < row_count {
            self.cursor_line += 1;
        }
    }

    /// Scroll correction; idempotent.
    pub fn scroll(&mut self) {
        if self.cursor_line >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = self.cursor_line + 1 - self.visible_rows;
        } else if self.cursor_line < self.scroll_offset {
            self.scroll_offset = self.cursor_line;
        }
    }

    /// Row indices painted this frame, clipped to `row_count`.
    pub fn visible_range(&self, row_count: usize) -> Range<usize> {
        let start = self.scroll_offset.min(row_count);
        let end = (self.scroll_offset + self.visible_rows).min(row_count);
        start..end
    }

    /// Cursor row relative to the top of the viewport.
    pub fn screen_cursor_row(&self) -> usize {
        self.cursor_line - self.scroll_offset
    }
}
