//! Full-frame side-by-side renderer.
//!
//! One call produces one complete frame as a byte buffer: cursor hidden,
//! every content row repainted, status line in reverse video on the last
//! terminal row, cursor shown at column 0 of the cursor row. Nothing is
//! cached between frames; output depends only on the arguments.
//!
//! Column layout for a terminal `w` columns wide, with `c = w/2 - 1`:
//! `[left: c-2][divider: 3][right: c]`, which never reaches column `w-1`.
//! Each row is positioned with an absolute move and closed with
//! clear-to-end-of-line, so autowrap never shifts following rows.

use anyhow::Result;
use core_events::TerminalGeometry;
use core_model::{Row, Viewport};
use core_text::fit_to_width;
use crossterm::style::Color;
use tracing::trace;

use crate::{
    status::{StatusContext, build_status},
    theme::Theme,
    writer::Writer,
};

pub const STATUS_ROWS: u16 = 1;
pub const DIVIDER: &str = "\u{2503}  ";
const DIVIDER_WIDTH: usize = 3;
pub const FILLER: &str = "~";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub column_width: usize,
    pub left_field: usize,
    pub right_field: usize,
    /// False on terminals too narrow to hold both fields and the divider.
    pub divided: bool,
}

impl ColumnLayout {
    pub fn for_width(width: u16) -> Self {
        let width = width as usize;
        let column_width = (width / 2).saturating_sub(1);
        let left_field = column_width.saturating_sub(2);
        let right_field = column_width;
        Self {
            column_width,
            left_field,
            right_field,
            divided: left_field + DIVIDER_WIDTH + right_field < width,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub theme: Theme,
    pub tab_width: usize,
}

impl Renderer {
    pub fn new(theme: Theme, tab_width: usize) -> Self {
        Self { theme, tab_width }
    }

    /// Build one frame. `viewport` must already be scroll-corrected; rows are
    /// laid out in its `visible_columns`, never wider than the terminal.
    pub fn render(
        &self,
        rows: &[Row],
        viewport: &Viewport,
        geometry: TerminalGeometry,
        status: &StatusContext<'_>,
    ) -> Result<Vec<u8>> {
        let mut w = Writer::new();
        w.hide_cursor();
        let content_rows =
            (geometry.content_rows(STATUS_ROWS) as usize).min(viewport.visible_rows());
        let columns = viewport.visible_columns().min(geometry.width as usize);
        let layout = ColumnLayout::for_width(columns as u16);
        for screen_y in 0..content_rows {
            let index = viewport.scroll_offset() + screen_y;
            w.move_to(0, screen_y as u16);
            let bg = if index == viewport.cursor_line() {
                self.theme.cursor_line
            } else {
                Color::Reset
            };
            match rows.get(index) {
                Some(row) => self.paint_row(&mut w, row, layout, bg),
                None => {
                    w.colors(Color::Reset, bg);
                    if geometry.width > 0 {
                        w.print(FILLER);
                    }
                }
            }
            w.clear_to_eol();
            w.reset_style();
        }
        if geometry.height > 0 {
            w.move_to(0, geometry.height - 1);
            w.reverse();
            w.print(&build_status(status, geometry.width as usize));
            w.reset_style();
        }
        let cursor_y = viewport
            .screen_cursor_row()
            .min(content_rows.saturating_sub(1));
        w.move_to(0, cursor_y as u16);
        w.show_cursor();
        let print_commands = w.print_commands;
        let bytes = w.into_bytes()?;
        trace!(
            target: "render",
            content_rows,
            print_commands,
            bytes = bytes.len(),
            geometry = %geometry,
            "frame_rendered"
        );
        Ok(bytes)
    }

    fn paint_row(&self, w: &mut Writer, row: &Row, layout: ColumnLayout, bg: Color) {
        let fg = self.theme.foreground(row.command());
        w.colors(fg, bg);
        if !layout.divided {
            return;
        }
        let left = fit_to_width(row.left(), layout.left_field, self.tab_width);
        w.print(&left.padded(layout.left_field));
        w.colors(Color::Reset, bg);
        w.print(DIVIDER);
        w.colors(fg, bg);
        let right = fit_to_width(row.right(), layout.right_field, self.tab_width);
        w.print(&right.padded(layout.right_field));
    }
}
