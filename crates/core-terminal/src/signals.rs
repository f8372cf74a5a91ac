//! Signal listener thread.
//!
//! SIGWINCH becomes a `Resize` message carrying the size queried at delivery
//! time. SIGTERM and SIGHUP become `Terminate` so the session loop returns
//! normally and the terminal guard restores the screen. The thread only ever
//! sends messages; it never touches view state.
//!
//! SIGTERM and SIGHUP also raise a shared stop flag straight from the signal
//! handler, so a reader blocked mid-sequence can give up its wait and let the
//! loop see `Terminate`.

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use core_events::TerminalGeometry;
use signal_hook::SigId;
use signal_hook::consts::signal::{SIGHUP, SIGTERM, SIGWINCH};
use signal_hook::iterator::{Handle, Signals};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

use crate::TerminalError;

const CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    Resize(TerminalGeometry),
    Terminate,
}

#[derive(Debug)]
pub struct SignalListener {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
    stop: Arc<AtomicBool>,
    flag_ids: Vec<SigId>,
}

impl SignalListener {
    pub fn spawn() -> Result<(Self, Receiver<SessionSignal>), TerminalError> {
        let (tx, rx) = bounded(CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let mut flag_ids = Vec::with_capacity(2);
        for signal in [SIGTERM, SIGHUP] {
            match signal_hook::flag::register(signal, Arc::clone(&stop)) {
                Ok(id) => flag_ids.push(id),
                Err(e) => {
                    unregister_all(&flag_ids);
                    return Err(TerminalError::Signals(e));
                }
            }
        }
        let mut signals = match Signals::new([SIGWINCH, SIGTERM, SIGHUP]) {
            Ok(signals) => signals,
            Err(e) => {
                unregister_all(&flag_ids);
                return Err(TerminalError::Signals(e));
            }
        };
        let handle = signals.handle();
        let thread = std::thread::Builder::new()
            .name("tinydiff-signals".into())
            .spawn(move || {
                for signal in signals.forever() {
                    let msg = match signal {
                        SIGWINCH => match crossterm::terminal::size() {
                            Ok((w, h)) => SessionSignal::Resize(TerminalGeometry::new(w, h)),
                            Err(e) => {
                                warn!(
                                    target: "session.signal",
                                    error = %e,
                                    "resize_size_query_failed"
                                );
                                continue;
                            }
                        },
                        _ => {
                            info!(target: "session.signal", signal, "termination_signal");
                            SessionSignal::Terminate
                        }
                    };
                    forward(&tx, msg);
                }
            })
            .map_err(|e| {
                unregister_all(&flag_ids);
                TerminalError::Signals(e)
            })?;
        Ok((
            Self {
                handle,
                thread: Some(thread),
                stop,
                flag_ids,
            },
            rx,
        ))
    }

    /// Set once SIGTERM or SIGHUP has been delivered.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }
}

fn unregister_all(ids: &[SigId]) {
    for id in ids {
        signal_hook::low_level::unregister(*id);
    }
}

fn forward(tx: &Sender<SessionSignal>, msg: SessionSignal) {
    match tx.try_send(msg) {
        Ok(()) => debug!(target: "session.signal", ?msg, "signal_forwarded"),
        Err(TrySendError::Full(_)) => {
            warn!(target: "session.signal", ?msg, "signal_channel_full")
        }
        Err(TrySendError::Disconnected(_)) => {}
    }
}

impl Drop for SignalListener {
    fn drop(&mut self) {
        unregister_all(&self.flag_ids);
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
