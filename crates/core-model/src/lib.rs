//! View model for the side-by-side diff viewer.
//!
//! * `row`: the `Row` / `Command` pair produced once per view and never
//!   mutated afterwards; row indices double as line numbers.
//! * `formatter`: `SideBySideFormatter`, the single `ReplacementHandler`
//!   implementation turning a `DiffResult` into rows.
//! * `viewport`: cursor line and scroll offset over the rows, driven by
//!   vertical key events and resize.
//!
//! Nothing in this crate performs I/O; the renderer reads rows and viewport
//! state by shared reference.

mod formatter;
mod row;
mod viewport;

pub use formatter::{NEWLINE_GLYPH, SideBySideFormatter, strip_terminator, visualize_embedded};
pub use row::{Command, Row, RowSummary};
pub use viewport::Viewport;
