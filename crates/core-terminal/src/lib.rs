//! Terminal ownership and the interactive session loop.
//!
//! `TerminalGuard` owns raw mode and the alternate screen, `SignalListener`
//! turns SIGWINCH/SIGTERM/SIGHUP into channel messages, and
//! `TerminalSession` ties a key decoder, an output sink and a
//! `TerminalView` together. Unix only.

mod error;
mod guard;
mod session;
mod signals;

pub use error::TerminalError;
pub use guard::{TerminalGuard, restore_best_effort};
pub use session::{SessionEnd, TerminalSession, TerminalView};
pub use signals::{SessionSignal, SignalListener};
