use crossterm::{
    cursor::{MoveTo, Show},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{Write, stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use crate::TerminalError;

/// Set while the process holds raw mode and the alternate screen. Whoever
/// clears it (guard or panic hook) performs the one restoration.
static TERMINAL_TAKEN: AtomicBool = AtomicBool::new(false);

fn claim_restore() -> bool {
    TERMINAL_TAKEN.swap(false, Ordering::SeqCst)
}

/// RAII guard owning raw mode and the alternate screen.
///
/// Restoration runs on `leave`, on drop, and therefore on early return,
/// error propagation and unwinding panics alike. It happens once per
/// `enter`: after `restore_best_effort` the guard only marks itself inactive,
/// so text printed on the main screen in between survives.
#[derive(Debug)]
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    /// Enable raw mode and switch to the alternate screen. If the screen
    /// switch fails raw mode is undone before the error is returned.
    pub fn enter() -> Result<Self, TerminalError> {
        enable_raw_mode().map_err(TerminalError::RawMode)?;
        if let Err(e) = execute!(stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(TerminalError::Screen(e));
        }
        TERMINAL_TAKEN.store(true, Ordering::SeqCst);
        debug!(target: "session", "terminal_entered");
        Ok(Self { active: true })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Clear the screen and return to cooked mode. Idempotent.
    pub fn leave(&mut self) -> Result<(), TerminalError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        if !claim_restore() {
            debug!(target: "session", "terminal_already_restored");
            return Ok(());
        }
        let mut out = stdout();
        let screen = execute!(
            out,
            Clear(ClearType::All),
            MoveTo(0, 0),
            Show,
            LeaveAlternateScreen
        );
        // Cooked mode is restored even when the screen commands failed.
        let raw = disable_raw_mode();
        screen.map_err(TerminalError::Screen)?;
        raw.map_err(TerminalError::RawMode)?;
        out.flush()?;
        debug!(target: "session", "terminal_restored");
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            warn!(target: "session", error = %e, "terminal_restore_failed");
        }
    }
}

/// Restore the terminal without a guard at hand (panic hook path).
/// Every step is attempted; failures are ignored. Returns `false` when the
/// terminal was not taken or has already been restored.
pub fn restore_best_effort() -> bool {
    if !claim_restore() {
        return false;
    }
    let mut out = stdout();
    let _ = execute!(out, Clear(ClearType::All), MoveTo(0, 0), Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
    let _ = out.flush();
    true
}
