//! `OutputBuffer`: one frame's worth of control bytes, written in one go.

use super::capabilities::{Capabilities, Capability};
use super::channel::Channel;
use crate::error::Result;

/// Reusable byte buffer that a frame's diff output is collected into.
///
/// The whole frame goes to the channel in a single write so the terminal
/// never shows half a frame.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Backing vector, for producers that append directly.
    #[inline]
    pub fn bytes_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Append a capability's control string (nothing if unsupported).
    #[inline]
    pub fn emit(&mut self, caps: &Capabilities, cap: Capability) {
        caps.emit(&mut self.data, cap);
    }

    /// Write everything to `channel` and empty the buffer.
    ///
    /// Empty buffers are not written at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel write fails; the bytes are kept.
    pub fn flush_to<C: Channel + ?Sized>(&mut self, channel: &mut C) -> Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        channel.write_all(&self.data)?;
        self.data.clear();
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
