use anyhow::Result;
use core_diff::{DiffAlgorithm, open_pair};
use core_events::{KeyEvent, TerminalGeometry};
use core_model::{Row, RowSummary, SideBySideFormatter, Viewport};
use core_render::{Renderer, STATUS_ROWS, StatusContext};
use core_terminal::TerminalView;
use std::path::Path;
use tracing::{info, trace};

/// The side-by-side view: rows formatted once, a viewport over them, and
/// the renderer that paints both.
pub struct DiffView {
    rows: Vec<Row>,
    summary: RowSummary,
    viewport: Viewport,
    renderer: Renderer,
    left_name: String,
    right_name: String,
}

impl DiffView {
    pub fn new(
        rows: Vec<Row>,
        renderer: Renderer,
        left_name: String,
        right_name: String,
    ) -> Self {
        Self {
            summary: RowSummary::of(&rows),
            rows,
            viewport: Viewport::new(),
            renderer,
            left_name,
            right_name,
        }
    }

    /// Diff two files. Unreadable input yields an empty view.
    pub fn from_paths(
        left: &Path,
        right: &Path,
        algorithm: DiffAlgorithm,
        renderer: Renderer,
    ) -> Self {
        let result = open_pair(left, right, algorithm);
        let rows = SideBySideFormatter::format(&result);
        let view = Self::new(rows, renderer, display_name(left), display_name(right));
        info!(
            target: "runtime",
            %algorithm,
            identical = result.is_identical(),
            rows = view.rows.len(),
            deleted = view.summary.deleted,
            inserted = view.summary.inserted,
            changed = view.summary.changed,
            "view_built"
        );
        view
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

impl TerminalView for DiffView {
    fn update_size(&mut self, geometry: TerminalGeometry) {
        self.viewport.resize(
            geometry.content_rows(STATUS_ROWS) as usize,
            geometry.width as usize,
        );
    }

    fn render(&self, geometry: TerminalGeometry) -> Result<Vec<u8>> {
        let status = StatusContext {
            left_name: &self.left_name,
            right_name: &self.right_name,
            cursor_line: self.viewport.cursor_line(),
            row_count: self.rows.len(),
            scroll_offset: self.viewport.scroll_offset(),
            summary: self.summary,
        };
        self.renderer.render(&self.rows, &self.viewport, geometry, &status)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if !key.is_vertical_motion() {
            trace!(target: "runtime", key = key.name(), "key_ignored");
            return;
        }
        let moved = self.viewport.apply(key, self.rows.len());
        trace!(
            target: "runtime",
            key = key.name(),
            moved,
            cursor = self.viewport.cursor_line(),
            offset = self.viewport.scroll_offset(),
            "key_applied"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::Command;
    use core_render::Theme;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn renderer() -> Renderer {
        Renderer::new(Theme::default(), 4)
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn builds_rows_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.txt", "a\nb\nc\n");
        let b = write_file(&dir, "b.txt", "a\nx\nc\n");
        let view = DiffView::from_paths(&a, &b, DiffAlgorithm::Myers, renderer());
        assert_eq!(
            view.rows(),
            &[Row::kept("a", "a"), Row::changed("b", "x"), Row::kept("c", "c")]
        );
        assert_eq!(view.left_name, "a.txt");
    }

    #[test]
    fn missing_file_gives_empty_view_that_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_file(&dir, "a.txt", "a\n");
        let missing = dir.path().join("nope.txt");
        let mut view = DiffView::from_paths(&a, &missing, DiffAlgorithm::Myers, renderer());
        assert!(view.rows().is_empty());
        let g = TerminalGeometry::new(40, 5);
        view.update_size(g);
        view.handle_key(KeyEvent::PageDown);
        assert_eq!(view.viewport().cursor_line(), 0);
        let frame = String::from_utf8(view.render(g).unwrap()).unwrap();
        // Filler rows are a `~` followed by clear-to-end-of-line.
        assert_eq!(frame.matches("~\x1b[K").count(), 4);
        assert!(frame.contains("Ln 0/0"));
    }

    #[test]
    fn resize_reserves_status_row() {
        let rows = (0..50).map(|i| Row::inserted(i.to_string())).collect();
        let mut view = DiffView::new(rows, renderer(), "l".into(), "r".into());
        view.update_size(TerminalGeometry::new(80, 11));
        assert_eq!(view.viewport().visible_rows(), 10);
        assert_eq!(view.viewport().visible_columns(), 80);
        for _ in 0..15 {
            view.handle_key(KeyEvent::Down);
        }
        assert_eq!(view.viewport().scroll_offset(), 6);
        // Shrinking keeps the cursor on screen.
        view.update_size(TerminalGeometry::new(80, 4));
        assert_eq!(view.viewport().scroll_offset(), 13);
        assert_eq!(view.rows()[15].command(), Command::Inserted);
    }
}
