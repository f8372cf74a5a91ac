//! Diff result → side-by-side rows.
//!
//! Hunk policy:
//! * empty `from` → one `Inserted` row per `to` line;
//! * empty `to` → one `Deleted` row per `from` line;
//! * both present → lines paired by position as `Changed` rows up to the
//!   shorter side, the overflow of the longer side following as plain
//!   `Deleted` / `Inserted` rows;
//! * keep pairs become `Kept` rows, and a pair missing either side is
//!   skipped.
//!
//! Text: every line loses its trailing terminator. On the `Changed` path only,
//! an embedded terminator stays visible as `↵` so a newline difference inside
//! a paired line is not silently hidden.

use core_diff::{DiffResult, ReplacementHandler};
use tracing::debug;

use crate::row::Row;

/// Glyph standing in for an embedded line terminator on changed rows.
pub const NEWLINE_GLYPH: &str = "\u{21b5}";

#[derive(Debug, Default)]
pub struct SideBySideFormatter {
    rows: Vec<Row>,
    skipped_keeps: usize,
}

impl SideBySideFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format a complete result in one pass.
    pub fn format(result: &DiffResult) -> Vec<Row> {
        let mut formatter = Self::new();
        result.accept_replacement_handler(&mut formatter);
        formatter.into_rows()
    }

    pub fn into_rows(self) -> Vec<Row> {
        debug!(
            target: "diff",
            rows = self.rows.len(),
            skipped_keeps = self.skipped_keeps,
            "side_by_side_formatted"
        );
        self.rows
    }

    fn push_inserted(&mut self, lines: &[String]) {
        self.rows
            .extend(lines.iter().map(|l| Row::inserted(strip_terminator(l))));
    }

    fn push_deleted(&mut self, lines: &[String]) {
        self.rows
            .extend(lines.iter().map(|l| Row::deleted(strip_terminator(l))));
    }
}

impl ReplacementHandler for SideBySideFormatter {
    fn on_replacement(&mut self, from: &[String], to: &[String]) {
        if from.is_empty() {
            self.push_inserted(to);
            return;
        }
        if to.is_empty() {
            self.push_deleted(from);
            return;
        }
        let paired = from.len().min(to.len());
        for (a, b) in from.iter().zip(to) {
            self.rows
                .push(Row::changed(visualize_embedded(a), visualize_embedded(b)));
        }
        self.push_deleted(&from[paired..]);
        self.push_inserted(&to[paired..]);
    }

    fn on_keep(&mut self, original: Option<&str>, modified: Option<&str>) {
        match (original, modified) {
            (Some(a), Some(b)) => self
                .rows
                .push(Row::kept(strip_terminator(a), strip_terminator(b))),
            _ => self.skipped_keeps += 1,
        }
    }
}

/// Remove one trailing `\n`, then one trailing `\r`.
pub fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Strip the trailing terminator and render any remaining one as a glyph.
pub fn visualize_embedded(line: &str) -> String {
    strip_terminator(line)
        .replace("\r\n", NEWLINE_GLYPH)
        .replace('\n', NEWLINE_GLYPH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Command;
    use core_diff::DiffGroup;
    use pretty_assertions::assert_eq;

    fn lines(n: usize, prefix: &str) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}\n")).collect()
    }

    fn commands(rows: &[Row]) -> Vec<Command> {
        rows.iter().map(Row::command).collect()
    }

    #[test]
    fn keep_change_keep_scenario() {
        let result = DiffResult::new(vec![
            DiffGroup::keep("a\n", "a\n"),
            DiffGroup::replacement(["b\n"], ["x\n"]),
            DiffGroup::keep("c\n", "c\n"),
        ]);
        assert_eq!(
            SideBySideFormatter::format(&result),
            vec![
                Row::kept("a", "a"),
                Row::changed("b", "x"),
                Row::kept("c", "c"),
            ]
        );
    }

    #[test]
    fn pure_insertion_rows_have_empty_left() {
        let result = DiffResult::new(vec![DiffGroup::Replacement {
            from: Vec::new(),
            to: lines(4, "n"),
        }]);
        let rows = SideBySideFormatter::format(&result);
        assert_eq!(rows.len(), 4);
        assert!(
            rows.iter()
                .all(|r| r.command() == Command::Inserted && r.left().is_empty())
        );
        assert_eq!(rows[3].right(), "n3");
    }

    #[test]
    fn overflow_on_right_becomes_inserted() {
        let result = DiffResult::new(vec![DiffGroup::Replacement {
            from: lines(3, "o"),
            to: lines(5, "n"),
        }]);
        let rows = SideBySideFormatter::format(&result);
        assert_eq!(
            commands(&rows),
            vec![
                Command::Changed,
                Command::Changed,
                Command::Changed,
                Command::Inserted,
                Command::Inserted,
            ]
        );
        assert_eq!(rows[2], Row::changed("o2", "n2"));
        assert_eq!(rows[4], Row::inserted("n4"));
    }

    #[test]
    fn overflow_on_left_becomes_deleted() {
        let result = DiffResult::new(vec![DiffGroup::Replacement {
            from: lines(5, "o"),
            to: lines(2, "n"),
        }]);
        let rows = SideBySideFormatter::format(&result);
        assert_eq!(
            commands(&rows),
            vec![
                Command::Changed,
                Command::Changed,
                Command::Deleted,
                Command::Deleted,
                Command::Deleted,
            ]
        );
        assert_eq!(rows[2], Row::deleted("o2"));
    }

    #[test]
    fn half_present_keep_pairs_are_skipped() {
        let result = DiffResult::new(vec![
            DiffGroup::Keep {
                original: Some("a\n".into()),
                modified: None,
            },
            DiffGroup::Keep {
                original: None,
                modified: None,
            },
            DiffGroup::keep("b\n", "b\n"),
        ]);
        assert_eq!(SideBySideFormatter::format(&result), vec![Row::kept("b", "b")]);
    }

    #[test]
    fn trailing_terminators_are_stripped() {
        assert_eq!(strip_terminator("abc\r\n"), "abc");
        assert_eq!(strip_terminator("abc\n"), "abc");
        assert_eq!(strip_terminator("abc\r"), "abc");
        assert_eq!(strip_terminator("abc"), "abc");
        assert_eq!(strip_terminator("\n"), "");
    }

    #[test]
    fn embedded_terminator_visible_only_on_changed_path() {
        let result = DiffResult::new(vec![
            DiffGroup::replacement(["one\ntwo\n"], ["one two\n"]),
            DiffGroup::replacement(["gone\nline\n"], Vec::<String>::new()),
        ]);
        let rows = SideBySideFormatter::format(&result);
        assert_eq!(rows[0], Row::changed("one\u{21b5}two", "one two"));
        // Deleted path strips the trailing terminator only.
        assert_eq!(rows[1], Row::deleted("gone\nline"));
    }

    #[test]
    fn crlf_embedded_collapses_to_one_glyph() {
        assert_eq!(visualize_embedded("a\r\nb\r\n"), "a\u{21b5}b");
    }
}
