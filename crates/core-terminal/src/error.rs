use std::io;
use thiserror::Error;

/// Failures while taking over or talking to the terminal.
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("failed to switch terminal raw mode: {0}")]
    RawMode(#[source] io::Error),
    #[error("failed to switch alternate screen: {0}")]
    Screen(#[source] io::Error),
    #[error("failed to query terminal size: {0}")]
    Size(#[source] io::Error),
    #[error("failed to install signal listener: {0}")]
    Signals(#[source] io::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
