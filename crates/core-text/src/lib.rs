//! Terminal text measurement: grapheme widths and column fitting used by the
//! side-by-side renderer.

pub mod fit;
pub mod width;

pub use fit::{Fitted, fit_to_width};
pub use width::egc_width;
