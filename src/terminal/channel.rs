//! Channel: the byte pipe between the engine and a terminal device.

use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::time::Duration;

/// A terminal device as the engine loop sees it.
///
/// Only the engine touches a channel; widgets draw through canvases.
pub trait Channel {
    /// Wait up to `timeout` (forever if `None`) for input.
    ///
    /// Returns `Ok(None)` on timeout and [`Error::InputClosed`] once the
    /// device has no more input to give.
    fn read(&mut self, timeout: Option<Duration>) -> Result<Option<Vec<u8>>>;

    /// Write every byte, retrying interrupted writes.
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Current `(columns, rows)`.
    fn size(&self) -> Result<(u16, u16)>;

    /// New size if the device was resized since the last call.
    fn poll_resize(&mut self) -> Option<(u16, u16)> {
        None
    }

    /// Whether the process was asked to terminate.
    fn terminated(&self) -> bool {
        false
    }

    /// Put the device back the way it was found. Calling it twice is a no-op.
    fn restore(&mut self) -> Result<()>;
}

/// An in-memory channel: scripted input, captured output.
///
/// Useful for driving the engine in tests and benchmarks.
#[derive(Debug, Clone, Default)]
pub struct MemoryChannel {
    input: VecDeque<Vec<u8>>,
    output: Vec<u8>,
    size: (u16, u16),
    resize: Option<(u16, u16)>,
    terminated: bool,
    closed: bool,
    restored: bool,
}

impl MemoryChannel {
    /// A channel reporting `width` x `height`.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: (width, height),
            ..Self::default()
        }
    }

    /// Queue one chunk of input, delivered by a single `read`.
    pub fn push_input(&mut self, bytes: impl Into<Vec<u8>>) {
        self.input.push_back(bytes.into());
    }

    /// Change the size and report it on the next `poll_resize`.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.resize = Some((width, height));
    }

    /// Report [`Error::InputClosed`] once the scripted input runs out.
    pub fn close_input(&mut self) {
        self.closed = true;
    }

    /// Pretend a termination signal arrived.
    pub fn terminate(&mut self) {
        self.terminated = true;
    }

    /// Everything written so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Take everything written so far.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Whether [`Channel::restore`] ran.
    #[inline]
    pub const fn is_restored(&self) -> bool {
        self.restored
    }
}

impl Channel for MemoryChannel {
    /// Pops a chunk; an exhausted script reads as a timeout unless the
    /// input was closed.
    fn read(&mut self, _timeout: Option<Duration>) -> Result<Option<Vec<u8>>> {
        match self.input.pop_front() {
            Some(chunk) => Ok(Some(chunk)),
            None if self.closed => Err(Error::InputClosed),
            None => Ok(None),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        if self.restored {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "channel restored",
            )));
        }
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(self.size)
    }

    fn poll_resize(&mut self) -> Option<(u16, u16)> {
        self.resize.take()
    }

    fn terminated(&self) -> bool {
        self.terminated
    }

    fn restore(&mut self) -> Result<()> {
        self.restored = true;
        Ok(())
    }
}
