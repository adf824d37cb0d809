//! Growable outbound byte queue with partial-write tracking.

use bytes::BytesMut;

/// Outbound byte queue for one connection.
///
/// Bytes are appended at the queued end and flushed from a `sent`
/// cursor, so a short write never re-copies bytes the socket already
/// accepted. When everything queued has been sent the queue resets and
/// the buffer's capacity is reused. Invariant: `sent <= queued`.
///
/// The queue has a single owner: the session task appends during
/// dispatch and flushes on write readiness; there are no concurrent
/// writers.
#[derive(Debug, Default)]
pub struct SendQueue {
    buf: BytesMut,
    sent: usize,
}

impl SendQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for sending, growing the buffer as needed.
    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Total bytes queued since the last full drain.
    pub fn queued(&self) -> usize {
        self.buf.len()
    }

    /// Bytes accepted by the socket so far.
    pub fn sent(&self) -> usize {
        self.sent
    }

    /// Whether any unsent bytes remain.
    pub fn has_pending(&self) -> bool {
        self.sent < self.buf.len()
    }

    /// The unsent region.
    pub fn pending(&self) -> &[u8] {
        &self.buf[self.sent..]
    }

    /// Attempt one write of the unsent region.
    ///
    /// `write` receives the pending bytes and returns how many were
    /// accepted; the cursor advances by that amount. A full drain
    /// resets the queue. Returns the accepted count.
    pub fn flush_once<F>(&mut self, write: F) -> std::io::Result<usize>
    where
        F: FnOnce(&[u8]) -> std::io::Result<usize>,
    {
        if !self.has_pending() {
            return Ok(0);
        }

        let n = write(&self.buf[self.sent..])?;
        debug_assert!(n <= self.buf.len() - self.sent);
        self.sent += n;
        if self.sent == self.buf.len() {
            self.buf.clear();
            self.sent = 0;
        }
        Ok(n)
    }
}
