//! Status line composition.
//!
//! Format:
//! `<left> | <right>  Ln <cursor+1>/<rows>  Off <offset>  -<deleted> +<inserted> ~<changed>`
//! * An empty row sequence shows `Ln 0/0`.
//!
//! Two stages, as everywhere the status line is built:
//! 1. `compose_status` produces ordered `StatusSegment` items.
//! 2. `format_status` renders them into the plain string.
//!
//! `build_status` then fits the string to the terminal width; reverse video
//! is applied by the frame renderer.

use core_model::RowSummary;
use core_text::fit_to_width;
use std::fmt::Write as _;

/// What the status line needs to know about the current frame.
#[derive(Debug, Clone, Copy)]
pub struct StatusContext<'a> {
    pub left_name: &'a str,
    pub right_name: &'a str,
    pub cursor_line: usize, // 0-based
    pub row_count: usize,
    pub scroll_offset: usize,
    pub summary: RowSummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Names { left: &'a str, right: &'a str },
    /// 1-based line over total; `line_1` is 0 when there are no rows.
    Position { line_1: usize, total: usize },
    Offset(usize),
    Counts {
        deleted: usize,
        inserted: usize,
        changed: usize,
    },
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let line_1 = if ctx.row_count == 0 {
        0
    } else {
        ctx.cursor_line + 1
    };
    vec![
        StatusSegment::Names {
            left: ctx.left_name,
            right: ctx.right_name,
        },
        StatusSegment::Position {
            line_1,
            total: ctx.row_count,
        },
        StatusSegment::Offset(ctx.scroll_offset),
        StatusSegment::Counts {
            deleted: ctx.summary.deleted,
            inserted: ctx.summary.inserted,
            changed: ctx.summary.changed,
        },
    ]
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    let mut s = String::with_capacity(64);
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            s.push_str("  ");
        }
        // Writing into a String cannot fail.
        let _ = match seg {
            StatusSegment::Names { left, right } => write!(s, "{left} | {right}"),
            StatusSegment::Position { line_1, total } => write!(s, "Ln {line_1}/{total}"),
            StatusSegment::Offset(off) => write!(s, "Off {off}"),
            StatusSegment::Counts {
                deleted,
                inserted,
                changed,
            } => write!(s, "-{deleted} +{inserted} ~{changed}"),
        };
    }
    s
}

/// Status text truncated and padded to exactly `width` columns.
pub fn build_status(ctx: &StatusContext<'_>, width: usize) -> String {
    let text = format_status(&compose_status(ctx));
    fit_to_width(&text, width, 1).padded(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(cursor_line: usize, row_count: usize, scroll_offset: usize) -> StatusContext<'static> {
        StatusContext {
            left_name: "old.txt",
            right_name: "new.txt",
            cursor_line,
            row_count,
            scroll_offset,
            summary: RowSummary {
                inserted: 2,
                deleted: 1,
                changed: 3,
                kept: 10,
            },
        }
    }

    #[test]
    fn formats_all_segments() {
        let s = format_status(&compose_status(&ctx(4, 16, 2)));
        assert_eq!(s, "old.txt | new.txt  Ln 5/16  Off 2  -1 +2 ~3");
    }

    #[test]
    fn empty_rows_show_zero_position() {
        let mut c = ctx(0, 0, 0);
        c.summary = RowSummary::default();
        let s = format_status(&compose_status(&c));
        assert_eq!(s, "old.txt | new.txt  Ln 0/0  Off 0  -0 +0 ~0");
    }

    #[test]
    fn build_pads_and_truncates_to_width() {
        let c = ctx(0, 1, 0);
        let wide = build_status(&c, 60);
        assert_eq!(wide.chars().count(), 60);
        assert!(wide.starts_with("old.txt | new.txt  Ln 1/1"));
        assert_eq!(build_status(&c, 7), "old.txt");
        assert_eq!(build_status(&c, 0), "");
    }
}
