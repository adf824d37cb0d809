//! CRLF line framing over a byte stream.
//!
//! [`LineAssembler`] accumulates raw socket bytes and yields complete
//! lines with their `\r\n` terminator stripped. All framing state lives
//! in the assembler, so a CR arriving at the end of one read pairs
//! correctly with an LF at the start of the next, and reconnects start
//! from a clean slate by constructing a fresh assembler.

use bytes::{Buf, BytesMut};

use crate::error::FramingError;

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// Accumulates received bytes and splits them into CRLF-terminated lines.
///
/// An unterminated line longer than `max_line_len` raises
/// [`FramingError::LineTooLong`] once, the in-progress line is dropped,
/// and framing resumes at the next CRLF boundary.
#[derive(Debug)]
pub struct LineAssembler {
    buf: BytesMut,
    max_line_len: usize,
    discarding: bool,
}

impl LineAssembler {
    /// Create an assembler with the given maximum line length.
    pub fn new(max_line_len: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(max_line_len.min(4096)),
            max_line_len,
            discarding: false,
        }
    }

    /// Append a run of received bytes and iterate the complete lines
    /// they produce.
    ///
    /// The iterator is lazy and finite; any bytes after the last CRLF
    /// stay buffered for the next feed. Zero-length runs are harmless.
    pub fn feed(&mut self, chunk: &[u8]) -> Lines<'_> {
        self.buf.extend_from_slice(chunk);
        Lines { assembler: self }
    }

    /// Bytes received but not yet terminated by CRLF.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Drop everything buffered, keeping a trailing CR so a terminator
    /// split across reads is still recognized.
    fn drop_tail(&mut self) {
        match self.buf.last() {
            Some(b'\r') => {
                let keep_from = self.buf.len() - 1;
                self.buf.advance(keep_from);
            }
            _ => self.buf.clear(),
        }
    }

    fn next_line(&mut self) -> Option<Result<BytesMut, FramingError>> {
        loop {
            let crlf = find_crlf(&self.buf);

            if self.discarding {
                match crlf {
                    Some(pos) => {
                        // end of the overlong line; resume framing after it
                        self.buf.advance(pos + 2);
                        self.discarding = false;
                        continue;
                    }
                    None => {
                        self.drop_tail();
                        return None;
                    }
                }
            }

            match crlf {
                Some(pos) if pos > self.max_line_len => {
                    self.buf.advance(pos + 2);
                    return Some(Err(FramingError::LineTooLong {
                        actual: pos,
                        limit: self.max_line_len,
                    }));
                }
                Some(pos) => {
                    let mut line = self.buf.split_to(pos + 2);
                    line.truncate(pos);
                    return Some(Ok(line));
                }
                None => {
                    // a trailing CR may be half of a terminator split
                    // across reads; it does not count against the line
                    let pending = match self.buf.last() {
                        Some(b'\r') => self.buf.len() - 1,
                        _ => self.buf.len(),
                    };
                    if pending > self.max_line_len {
                        self.drop_tail();
                        self.discarding = true;
                        return Some(Err(FramingError::LineTooLong {
                            actual: pending,
                            limit: self.max_line_len,
                        }));
                    }
                    return None;
                }
            }
        }
    }
}

/// Draining iterator over the complete lines currently buffered.
pub struct Lines<'a> {
    assembler: &'a mut LineAssembler,
}

impl Iterator for Lines<'_> {
    type Item = Result<BytesMut, FramingError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.assembler.next_line()
    }
}
