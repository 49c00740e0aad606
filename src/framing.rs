//! Frame Reader
//!
//! Incremental reassembly of length-prefixed frames from the reliable
//! stream. The stream may deliver a partial frame, or several frames
//! coalesced into one read; [`FrameReader`] accumulates bytes and yields
//! complete frames in strict arrival order, never blocking for more data.

/// Reassembly buffer for `[len:2][tag:1][payload]` frames.
///
/// One transient instance per session; holds only bytes not yet consumed.
#[derive(Debug, Default)]
pub struct FrameReader {
    buf: Vec<u8>,
}

impl FrameReader {
    /// Create an empty reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append newly read bytes to the accumulator.
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Extract the next complete frame, if one is fully buffered.
    ///
    /// Returns the bytes after the length prefix (`[tag][payload]`) and
    /// advances past them. Returns `None` when fewer bytes than a length
    /// prefix plus its declared payload are available; the remainder is
    /// preserved for the next [`push`](Self::push).
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        if self.buf.len() < 2 {
            return None;
        }
        let len = u16::from_be_bytes([self.buf[0], self.buf[1]]) as usize;
        if self.buf.len() < 2 + len {
            return None;
        }
        let frame = self.buf[2..2 + len].to_vec();
        self.buf.drain(..2 + len);
        Some(frame)
    }

    /// Number of buffered, not-yet-consumed bytes.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}
