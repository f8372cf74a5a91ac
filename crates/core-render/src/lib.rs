//! Side-by-side frame rendering.
//!
//! * `frame`: the `Renderer`, a pure function from rows, viewport state and
//!   terminal geometry to one complete frame buffer.
//! * `status`: status line segments and formatting.
//! * `theme`: row and cursor-line colours resolved from configuration.
//! * `writer`: ordered terminal command buffer serialized with crossterm.
//!
//! Every frame is a full repaint. The session writes the returned buffer with
//! a single write and flush.

pub mod frame;
pub mod status;
pub mod theme;
pub mod writer;

pub use frame::{ColumnLayout, DIVIDER, FILLER, Renderer, STATUS_ROWS};
pub use status::{StatusContext, StatusSegment, build_status, compose_status, format_status};
pub use theme::Theme;
