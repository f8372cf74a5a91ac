//! Byte sources feeding the key decoder.
//!
//! A source hands out one byte at a time and understands two kinds of wait:
//! bounded (`Some(timeout)`, used for the first byte of a key so the session
//! can redraw periodically) and unbounded (`None`, used inside an escape
//! sequence). `StdinSource` reads the standard input descriptor directly,
//! bypassing `std::io::Stdin`'s internal buffer, because a buffered reader
//! would hide already-received bytes from `poll(2)`.
//!
//! Waits are polled in short slices so a termination flag raised from a
//! signal handler ends them early. An interrupted wait reports `Timeout`,
//! even for an unbounded read.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Read};
use std::os::fd::{AsFd, OwnedFd};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use tracing::trace;

/// Result of a single byte read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRead {
    Byte(u8),
    Timeout,
    Eof,
}

/// Blocking byte stream with an optional read timeout.
pub trait ByteSource {
    /// Read one byte. `None` waits indefinitely; an unbounded read returns
    /// `Timeout` only when the wait was cut short by a termination request.
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<ByteRead>;
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<ByteRead> {
        (**self).read_byte(timeout)
    }
}

const READ_CHUNK: usize = 64;
const POLL_SLICE: Duration = Duration::from_millis(100);

enum Readiness {
    Ready,
    Idle,
    Interrupted,
}

/// Unbuffered reader over a duplicate of the standard input descriptor.
pub struct StdinSource {
    file: File,
    pending: VecDeque<u8>,
    stop: Option<Arc<AtomicBool>>,
}

impl StdinSource {
    pub fn open() -> io::Result<Self> {
        let fd = io::stdin().as_fd().try_clone_to_owned()?;
        Ok(Self::from_fd(fd))
    }

    /// Read from any descriptor, e.g. one end of a pipe.
    pub fn from_fd(fd: OwnedFd) -> Self {
        Self {
            file: File::from(fd),
            pending: VecDeque::with_capacity(READ_CHUNK),
            stop: None,
        }
    }

    /// Abandon any wait once `stop` is set.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    fn stop_requested(&self) -> bool {
        self.stop.as_ref().is_some_and(|f| f.load(Ordering::Relaxed))
    }

    /// Wait for the descriptor to become readable. `false` means the wait
    /// expired, was interrupted by a signal (e.g. SIGWINCH, so the caller
    /// redraws), or was stopped.
    fn wait_readable(&self, timeout: Option<Duration>) -> io::Result<bool> {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            if self.stop_requested() {
                trace!(target: "input.source", "wait_stopped");
                return Ok(false);
            }
            let slice = match deadline {
                Some(deadline) => {
                    let left = deadline.saturating_duration_since(Instant::now());
                    if left.is_zero() {
                        return Ok(false);
                    }
                    left.min(POLL_SLICE)
                }
                None => POLL_SLICE,
            };
            match self.poll_once(slice)? {
                Readiness::Ready => return Ok(true),
                Readiness::Idle => {}
                // A bounded wait yields to the caller; an unbounded one keeps waiting.
                Readiness::Interrupted if deadline.is_some() => return Ok(false),
                Readiness::Interrupted => {}
            }
        }
    }

    fn poll_once(&self, slice: Duration) -> io::Result<Readiness> {
        let mut fds = [PollFd::new(self.file.as_fd(), PollFlags::POLLIN)];
        let slice_ms: u16 = slice.as_millis().try_into().unwrap_or(u16::MAX);
        match poll(&mut fds, PollTimeout::from(slice_ms)) {
            Ok(0) => Ok(Readiness::Idle),
            Ok(_) => Ok(Readiness::Ready),
            Err(Errno::EINTR) => {
                trace!(target: "input.source", "poll_interrupted");
                Ok(Readiness::Interrupted)
            }
            Err(e) => Err(io::Error::other(e)),
        }
    }

    fn fill(&mut self) -> io::Result<usize> {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match self.file.read(&mut buf) {
                Ok(n) => {
                    self.pending.extend(&buf[..n]);
                    return Ok(n);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl ByteSource for StdinSource {
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<ByteRead> {
        if let Some(b) = self.pending.pop_front() {
            return Ok(ByteRead::Byte(b));
        }
        if !self.wait_readable(timeout)? {
            return Ok(ByteRead::Timeout);
        }
        if self.fill()? == 0 {
            return Ok(ByteRead::Eof);
        }
        Ok(self
            .pending
            .pop_front()
            .map_or(ByteRead::Eof, ByteRead::Byte))
    }
}

/// Pre-recorded byte stream for tests and headless sessions.
///
/// Scripted `Timeout` entries are only observed by bounded reads; an
/// unbounded read skips them, matching a real descriptor which simply keeps
/// waiting. An exhausted script reports `Eof`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    script: VecDeque<ByteRead>,
}

impl ScriptedSource {
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = ByteRead>,
    {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.iter().copied().map(ByteRead::Byte))
    }

    /// Remaining scripted entries (diagnostics only).
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl ByteSource for ScriptedSource {
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<ByteRead> {
        loop {
            match self.script.pop_front() {
                None => return Ok(ByteRead::Eof),
                Some(ByteRead::Timeout) if timeout.is_none() => continue,
                Some(next) => return Ok(next),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_source_reports_eof_when_exhausted() {
        let mut src = ScriptedSource::from_bytes(b"a");
        assert_eq!(src.read_byte(None).unwrap(), ByteRead::Byte(b'a'));
        assert_eq!(src.read_byte(None).unwrap(), ByteRead::Eof);
        assert_eq!(src.read_byte(Some(Duration::ZERO)).unwrap(), ByteRead::Eof);
    }

    #[test]
    fn unbounded_read_skips_scripted_timeouts() {
        let mut src = ScriptedSource::new([ByteRead::Timeout, ByteRead::Byte(b'x')]);
        assert_eq!(src.read_byte(None).unwrap(), ByteRead::Byte(b'x'));
        assert_eq!(src.remaining(), 0);
    }

    #[test]
    fn bounded_read_observes_scripted_timeouts() {
        let mut src = ScriptedSource::new([ByteRead::Timeout, ByteRead::Byte(b'x')]);
        let wait = Some(Duration::from_millis(5));
        assert_eq!(src.read_byte(wait).unwrap(), ByteRead::Timeout);
        assert_eq!(src.read_byte(wait).unwrap(), ByteRead::Byte(b'x'));
    }

    fn pipe_source() -> (StdinSource, File) {
        let (read_end, write_end) = nix::unistd::pipe().unwrap();
        (StdinSource::from_fd(read_end), File::from(write_end))
    }

    #[test]
    fn descriptor_bytes_arrive_in_order() {
        use std::io::Write;
        let (mut src, mut tx) = pipe_source();
        tx.write_all(b"\x1b[B").unwrap();
        assert_eq!(src.read_byte(Some(Duration::from_secs(1))).unwrap(), ByteRead::Byte(0x1b));
        assert_eq!(src.read_byte(None).unwrap(), ByteRead::Byte(b'['));
        assert_eq!(src.read_byte(None).unwrap(), ByteRead::Byte(b'B'));
        assert_eq!(src.read_byte(Some(Duration::from_millis(20))).unwrap(), ByteRead::Timeout);
        drop(tx);
        assert_eq!(src.read_byte(None).unwrap(), ByteRead::Eof);
    }

    #[test]
    fn stop_flag_ends_unbounded_wait() {
        let (src, _tx) = pipe_source();
        let stop = Arc::new(AtomicBool::new(false));
        let mut src = src.with_stop_flag(stop.clone());
        let setter = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            stop.store(true, Ordering::Relaxed);
        });
        let started = Instant::now();
        assert_eq!(src.read_byte(None).unwrap(), ByteRead::Timeout);
        assert!(started.elapsed() < Duration::from_secs(5));
        setter.join().unwrap();
    }

    #[test]
    fn stop_flag_cuts_long_bounded_wait() {
        let (src, _tx) = pipe_source();
        let mut src = src.with_stop_flag(Arc::new(AtomicBool::new(true)));
        let started = Instant::now();
        assert_eq!(src.read_byte(Some(Duration::from_secs(60))).unwrap(), ByteRead::Timeout);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
