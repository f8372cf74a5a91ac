//! Raw byte stream → logical key decoding.
//!
//! Grammar (at most three reads after the introducer byte):
//!
//! | Bytes                  | Key                                   |
//! |------------------------|---------------------------------------|
//! | `ESC [ A/B/C/D`        | Up / Down / Right / Left              |
//! | `ESC [ H/F`            | Home / End                            |
//! | `ESC [ n ~`            | 1,7 Home; 3 Delete; 4,8 End; 5 PageUp; 6 PageDown |
//! | `ESC 0 H/F`            | Home / End                            |
//! | `ESC O A/B/C/D/H/F`    | SS3 arrows (application cursor mode)  |
//! | `q`, `0x03`            | Quit                                  |
//!
//! Anything else degrades to `Char(last byte read)`. Only the first byte is
//! read with a timeout; bytes inside a sequence wait indefinitely since the
//! terminal emits a sequence in one burst. A stopped source cuts that wait
//! short and the bytes read so far degrade as above.

use std::io;
use std::time::Duration;

use core_events::{KeyEvent, KeyRead};
use tracing::{debug, trace};

use crate::source::{ByteRead, ByteSource};

pub const ESC: u8 = 0x1b;
pub const CTRL_C: u8 = 0x03;
pub const QUIT_CHAR: u8 = b'q';

/// Default bounded wait for the first byte of a key.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(1000);

/// Outcome of an unbounded read inside an escape sequence.
enum SeqByte {
    Byte(u8),
    Ended,
    Stalled,
}

pub struct KeyDecoder<S> {
    source: S,
    timeout: Duration,
}

impl<S: ByteSource> KeyDecoder<S> {
    pub fn new(source: S, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Decode exactly one key, or report a timeout / end of stream.
    pub fn next_key(&mut self) -> io::Result<KeyRead> {
        let first = match self.source.read_byte(Some(self.timeout))? {
            ByteRead::Byte(b) => b,
            ByteRead::Timeout => return Ok(KeyRead::Timeout),
            ByteRead::Eof => return Ok(KeyRead::Eof),
        };
        let read = if first == ESC {
            self.decode_escape()?
        } else {
            KeyRead::Key(plain_key(first))
        };
        if let KeyRead::Key(key) = read {
            trace!(target: "input.decode", key = key.name(), "key_decoded");
        }
        Ok(read)
    }

    fn sequence_byte(&mut self) -> io::Result<SeqByte> {
        Ok(match self.source.read_byte(None)? {
            ByteRead::Byte(b) => SeqByte::Byte(b),
            ByteRead::Eof => SeqByte::Ended,
            ByteRead::Timeout => SeqByte::Stalled,
        })
    }

    fn decode_escape(&mut self) -> io::Result<KeyRead> {
        let second = match self.sequence_byte()? {
            SeqByte::Byte(b) => b,
            SeqByte::Ended => return Ok(KeyRead::Eof),
            SeqByte::Stalled => return Ok(passthrough(ESC)),
        };
        match second {
            b'[' => self.decode_csi(),
            b'0' | b'O' => {
                let third = match self.sequence_byte()? {
                    SeqByte::Byte(b) => b,
                    SeqByte::Ended => return Ok(KeyRead::Eof),
                    SeqByte::Stalled => return Ok(passthrough(second)),
                };
                let key = match third {
                    b'H' => KeyEvent::Home,
                    b'F' => KeyEvent::End,
                    b'A' if second == b'O' => KeyEvent::Up,
                    b'B' if second == b'O' => KeyEvent::Down,
                    b'C' if second == b'O' => KeyEvent::Right,
                    b'D' if second == b'O' => KeyEvent::Left,
                    other => return Ok(passthrough(other)),
                };
                Ok(KeyRead::Key(key))
            }
            other => Ok(passthrough(other)),
        }
    }

    fn decode_csi(&mut self) -> io::Result<KeyRead> {
        let third = match self.sequence_byte()? {
            SeqByte::Byte(b) => b,
            SeqByte::Ended => return Ok(KeyRead::Eof),
            SeqByte::Stalled => return Ok(passthrough(b'[')),
        };
        let key = match third {
            b'A' => KeyEvent::Up,
            b'B' => KeyEvent::Down,
            b'C' => KeyEvent::Right,
            b'D' => KeyEvent::Left,
            b'H' => KeyEvent::Home,
            b'F' => KeyEvent::End,
            b'0'..=b'9' => {
                let fourth = match self.sequence_byte()? {
                    SeqByte::Byte(b) => b,
                    SeqByte::Ended => return Ok(KeyRead::Eof),
                    SeqByte::Stalled => return Ok(passthrough(third)),
                };
                if fourth != b'~' {
                    return Ok(passthrough(fourth));
                }
                match numeric_key(third) {
                    Some(key) => key,
                    None => return Ok(passthrough(third)),
                }
            }
            other => return Ok(passthrough(other)),
        };
        Ok(KeyRead::Key(key))
    }
}

fn plain_key(byte: u8) -> KeyEvent {
    match byte {
        QUIT_CHAR | CTRL_C => KeyEvent::Quit,
        other => KeyEvent::Char(other),
    }
}

/// Unrecognised sequence tail: surface the last byte read as a literal.
fn passthrough(byte: u8) -> KeyRead {
    debug!(target: "input.decode", byte, "escape_passthrough");
    KeyRead::Key(KeyEvent::Char(byte))
}

fn numeric_key(digit: u8) -> Option<KeyEvent> {
    match digit {
        b'1' | b'7' => Some(KeyEvent::Home),
        b'3' => Some(KeyEvent::Delete),
        b'4' | b'8' => Some(KeyEvent::End),
        b'5' => Some(KeyEvent::PageUp),
        b'6' => Some(KeyEvent::PageDown),
        _ => None,
    }
}
