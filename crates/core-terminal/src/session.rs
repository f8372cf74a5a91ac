//! Interactive session loop.
//!
//! Each iteration: drain pending signals, push the current geometry into the
//! view, render one frame, write it with a single `write_all` + `flush`, then
//! block on the decoder for one key. A decoder timeout simply starts the next
//! iteration, which is how resize notifications get a redraw while no key is
//! pressed. Frames are strictly sequential.

use anyhow::{Context, Result};
use core_events::{KeyEvent, KeyRead, TerminalGeometry};
use core_input::{ByteSource, KeyDecoder, StdinSource};
use crossbeam_channel::Receiver;
use std::io::{Stdout, Write, stdout};
use std::time::Duration;
use tracing::{debug, info};

use crate::{SessionSignal, SignalListener, TerminalError, TerminalGuard};

/// A screen the session can drive.
pub trait TerminalView {
    /// Adopt the current terminal size. Called before every frame.
    fn update_size(&mut self, geometry: TerminalGeometry);
    /// Produce one complete frame.
    fn render(&self, geometry: TerminalGeometry) -> Result<Vec<u8>>;
    /// React to a non-quit key.
    fn handle_key(&mut self, key: KeyEvent);
}

/// Why `run` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    EndOfInput,
    Terminated,
}

pub struct TerminalSession<S: ByteSource, W: Write> {
    decoder: KeyDecoder<S>,
    out: W,
    geometry: TerminalGeometry,
    signals: Option<Receiver<SessionSignal>>,
    frames: u64,
    // Declared last: the listener stops before the guard restores the screen.
    listener: Option<SignalListener>,
    guard: Option<TerminalGuard>,
}

impl TerminalSession<StdinSource, Stdout> {
    /// Take over the controlling terminal: raw mode, alternate screen and
    /// signal listener. Everything is released when the session drops.
    pub fn open(timeout: Duration) -> Result<Self, TerminalError> {
        let source = StdinSource::open()?;
        let (w, h) = crossterm::terminal::size().map_err(TerminalError::Size)?;
        let guard = TerminalGuard::enter()?;
        let (listener, signals) = SignalListener::spawn()?;
        let source = source.with_stop_flag(listener.stop_flag());
        let geometry = TerminalGeometry::new(w, h);
        info!(
            target: "session",
            %geometry,
            timeout_ms = timeout.as_millis() as u64,
            "session_opened"
        );
        Ok(Self {
            decoder: KeyDecoder::new(source, timeout),
            out: stdout(),
            geometry,
            signals: Some(signals),
            frames: 0,
            listener: Some(listener),
            guard: Some(guard),
        })
    }
}

impl<S: ByteSource, W: Write> TerminalSession<S, W> {
    /// Session over arbitrary input and output without touching the
    /// terminal. Geometry stays fixed unless a signal channel is attached.
    pub fn headless(source: S, out: W, geometry: TerminalGeometry, timeout: Duration) -> Self {
        Self {
            decoder: KeyDecoder::new(source, timeout),
            out,
            geometry,
            signals: None,
            frames: 0,
            listener: None,
            guard: None,
        }
    }

    pub fn with_signals(mut self, signals: Receiver<SessionSignal>) -> Self {
        self.signals = Some(signals);
        self
    }

    pub fn geometry(&self) -> TerminalGeometry {
        self.geometry
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn is_interactive(&self) -> bool {
        self.guard.as_ref().is_some_and(TerminalGuard::is_active)
    }

    /// Run until quit, end of input or a termination signal.
    pub fn run(&mut self, view: &mut dyn TerminalView) -> Result<SessionEnd> {
        loop {
            if self.drain_signals() {
                info!(target: "session", frames = self.frames, "session_terminated");
                return Ok(SessionEnd::Terminated);
            }
            view.update_size(self.geometry);
            let frame = view.render(self.geometry)?;
            self.out.write_all(&frame).context("writing frame")?;
            self.out.flush().context("flushing frame")?;
            self.frames += 1;

            match self.decoder.next_key().context("reading key")? {
                KeyRead::Key(KeyEvent::Quit) => {
                    info!(target: "session", frames = self.frames, "session_quit");
                    return Ok(SessionEnd::Quit);
                }
                KeyRead::Key(key) => view.handle_key(key),
                KeyRead::Timeout => {}
                KeyRead::Eof => {
                    info!(target: "session", frames = self.frames, "session_input_closed");
                    return Ok(SessionEnd::EndOfInput);
                }
            }
        }
    }

    /// Apply queued resizes. Returns `true` when termination was requested.
    fn drain_signals(&mut self) -> bool {
        let Some(rx) = &self.signals else {
            return false;
        };
        let mut terminate = false;
        while let Ok(signal) = rx.try_recv() {
            match signal {
                SessionSignal::Resize(geometry) => {
                    debug!(
                        target: "session",
                        from = %self.geometry,
                        to = %geometry,
                        "geometry_updated"
                    );
                    self.geometry = geometry;
                }
                SessionSignal::Terminate => terminate = true,
            }
        }
        terminate
    }

    /// Release the terminal now rather than at drop. Idempotent.
    pub fn close(&mut self) -> Result<(), TerminalError> {
        self.listener = None;
        match self.guard.as_mut() {
            Some(guard) => guard.leave(),
            None => Ok(()),
        }
    }
}
