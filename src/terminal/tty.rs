//! TTY Channel: the controlling terminal in raw mode.
//!
//! Input is read on a dedicated thread as raw bytes and handed over a
//! bounded channel; decoding happens on the engine thread. Output goes
//! to stdout in whole-frame writes.

use super::capabilities::{Capabilities, Capability};
use super::channel::Channel;
use super::signals::Signals;
use crate::error::{Error, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use crossterm::{execute, terminal};
use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Chunks the reader may run ahead of the engine.
const INPUT_BACKLOG: usize = 64;

/// Bytes per `read(2)`.
const READ_CHUNK: usize = 1024;

/// How the terminal is set up on open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtyOptions {
    /// Switch to the alternate screen.
    pub alternate_screen: bool,
    /// Enable mouse reports.
    pub mouse: bool,
}

impl Default for TtyOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse: true,
        }
    }
}

/// Undoes terminal setup exactly once, from whichever path gets there first
/// (normal shutdown, a fatal error or a panic hook).
#[derive(Debug, Clone)]
pub struct TtyRestorer {
    done: Arc<AtomicBool>,
    reset: Arc<[u8]>,
    alternate_screen: bool,
}

impl TtyRestorer {
    /// Reset attributes, show the cursor, leave raw mode.
    ///
    /// Every step is attempted; the first failure is reported.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error hit while restoring.
    pub fn restore(&self) -> Result<()> {
        if self.done.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        let mut first: Option<io::Error> = None;
        let mut keep = |result: io::Result<()>| {
            if let Err(e) = result {
                first.get_or_insert(e);
            }
        };
        let mut out = io::stdout();
        keep(out.write_all(&self.reset).and_then(|()| out.flush()));
        if self.alternate_screen {
            keep(execute!(out, terminal::LeaveAlternateScreen));
        }
        keep(terminal::disable_raw_mode());
        debug!("terminal restored");
        first.map_or(Ok(()), |e| Err(Error::Io(e)))
    }

    /// Whether restore already ran.
    pub fn is_restored(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }
}

/// The process's controlling terminal.
#[derive(Debug)]
pub struct TtyChannel {
    input: Receiver<io::Result<Vec<u8>>>,
    signals: Option<Signals>,
    size: (u16, u16),
    restorer: TtyRestorer,
    /// Read error seen behind already-merged bytes; reported next read.
    deferred: Option<io::Error>,
}

impl TtyChannel {
    /// Put the terminal in raw mode and start reading input.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be queried or configured.
    /// Any setup already applied is undone first.
    pub fn open(caps: &Capabilities, options: TtyOptions) -> Result<Self> {
        let size = terminal::size()?;
        terminal::enable_raw_mode()?;

        let mut reset = Vec::new();
        caps.emit(&mut reset, Capability::AttributeReset);
        if options.mouse {
            caps.emit(&mut reset, Capability::MouseOff);
        }
        caps.emit(&mut reset, Capability::CursorShow);
        let restorer = TtyRestorer {
            done: Arc::new(AtomicBool::new(false)),
            reset: reset.into(),
            alternate_screen: options.alternate_screen,
        };

        if let Err(e) = Self::setup(caps, options) {
            let _ = restorer.restore();
            return Err(e);
        }

        let signals = match Signals::install() {
            Ok(signals) => Some(signals),
            Err(e) => {
                warn!(error = %e, "signal handlers unavailable; resize must be polled");
                None
            }
        };

        let (sender, input) = bounded(INPUT_BACKLOG);
        let spawned = thread::Builder::new()
            .name("gridloom-input".to_string())
            .spawn(move || read_loop(&sender));
        if let Err(e) = spawned {
            let _ = restorer.restore();
            return Err(Error::Io(e));
        }

        debug!(width = size.0, height = size.1, terminal = caps.name(), "tty opened");
        Ok(Self {
            input,
            signals,
            size,
            restorer,
            deferred: None,
        })
    }

    fn setup(caps: &Capabilities, options: TtyOptions) -> Result<()> {
        let mut out = io::stdout();
        if options.alternate_screen {
            execute!(out, terminal::EnterAlternateScreen)?;
        }
        let mut init = Vec::new();
        caps.emit(&mut init, Capability::CursorHide);
        if options.mouse {
            caps.emit(&mut init, Capability::MouseOn);
        }
        out.write_all(&init)?;
        out.flush()?;
        Ok(())
    }

    /// A handle that can restore the terminal from elsewhere, e.g. a panic hook.
    pub fn restorer(&self) -> TtyRestorer {
        self.restorer.clone()
    }
}

impl Channel for TtyChannel {
    fn read(&mut self, timeout: Option<Duration>) -> Result<Option<Vec<u8>>> {
        if let Some(e) = self.deferred.take() {
            return Err(Error::Io(e));
        }
        let received = match timeout {
            Some(timeout) => match self.input.recv_timeout(timeout) {
                Ok(chunk) => chunk,
                Err(RecvTimeoutError::Timeout) => return Ok(None),
                Err(RecvTimeoutError::Disconnected) => return Err(Error::InputClosed),
            },
            None => self.input.recv().map_err(|_| Error::InputClosed)?,
        };
        let bytes = received?;
        Ok(Some(drain_ready(&self.input, bytes, &mut self.deferred)))
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(bytes)?;
        out.flush()?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn poll_resize(&mut self) -> Option<(u16, u16)> {
        let signalled = self.signals.as_ref().map_or(true, Signals::take_resize);
        if !signalled {
            return None;
        }
        match terminal::size() {
            Ok(size) if size != self.size => {
                self.size = size;
                Some(size)
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "terminal size query failed");
                None
            }
        }
    }

    fn terminated(&self) -> bool {
        self.signals.as_ref().is_some_and(Signals::terminated)
    }

    fn restore(&mut self) -> Result<()> {
        self.restorer.restore()
    }
}

impl Drop for TtyChannel {
    fn drop(&mut self) {
        if let Err(e) = self.restorer.restore() {
            warn!(error = %e, "terminal restore failed");
        }
    }
}

/// Append chunks that are already waiting, so a sequence split across
/// reads reaches the decoder in one piece.
///
/// An error behind merged bytes is parked in `deferred` so the bytes are
/// still delivered.
fn drain_ready(
    input: &Receiver<io::Result<Vec<u8>>>,
    mut bytes: Vec<u8>,
    deferred: &mut Option<io::Error>,
) -> Vec<u8> {
    loop {
        match input.try_recv() {
            Ok(Ok(more)) => bytes.extend_from_slice(&more),
            Ok(Err(e)) => {
                debug!(pending = bytes.len(), error = %e, "input error deferred behind merged bytes");
                *deferred = Some(e);
                return bytes;
            }
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => return bytes,
        }
    }
}

/// Reader thread body: forward raw chunks until EOF, an error or the
/// receiving side goes away.
fn read_loop(sender: &Sender<io::Result<Vec<u8>>>) {
    let mut stdin = io::stdin().lock();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        match stdin.read(&mut chunk) {
            Ok(0) => {
                debug!("stdin reached end of file");
                return;
            }
            Ok(n) => {
                if sender.send(Ok(chunk[..n].to_vec())).is_err() {
                    return;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                debug!("stdin read interrupted; retrying");
            }
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                let _ = sender.send(Err(e));
                return;
            }
        }
    }
}
