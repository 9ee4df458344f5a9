//! Signals: resize and termination notifications as polled flags.
//!
//! Handlers only set an atomic flag; the engine loop reads the flags at
//! the top of each iteration.

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::SigId;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(unix)]
const RESIZE: &[i32] = &[signal_hook::consts::SIGWINCH];
#[cfg(not(unix))]
const RESIZE: &[i32] = &[];

#[cfg(unix)]
const TERMINATE: &[i32] = &[SIGINT, SIGTERM, signal_hook::consts::SIGHUP];
#[cfg(not(unix))]
const TERMINATE: &[i32] = &[SIGINT, SIGTERM];

/// Registered signal flags. Handlers are removed on drop.
#[derive(Debug)]
pub struct Signals {
    resize: Arc<AtomicBool>,
    terminate: Arc<AtomicBool>,
    ids: Vec<SigId>,
}

impl Signals {
    /// Register the handlers.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler cannot be installed.
    pub fn install() -> io::Result<Self> {
        let resize = Arc::new(AtomicBool::new(false));
        let terminate = Arc::new(AtomicBool::new(false));
        let mut ids = Vec::with_capacity(RESIZE.len() + TERMINATE.len());
        for &signal in RESIZE {
            ids.push(signal_hook::flag::register(signal, Arc::clone(&resize))?);
        }
        for &signal in TERMINATE {
            ids.push(signal_hook::flag::register(signal, Arc::clone(&terminate))?);
        }
        Ok(Self {
            resize,
            terminate,
            ids,
        })
    }

    /// Whether a resize arrived since the last call.
    pub fn take_resize(&self) -> bool {
        self.resize.swap(false, Ordering::Relaxed)
    }

    /// Whether a termination signal arrived.
    pub fn terminated(&self) -> bool {
        self.terminate.load(Ordering::Relaxed)
    }
}

impl Drop for Signals {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_resize_flag_is_consumed() {
        let signals = Signals::install().unwrap();
        assert!(!signals.take_resize());
        signal_hook::low_level::raise(signal_hook::consts::SIGWINCH).unwrap();
        assert!(signals.take_resize());
        assert!(!signals.take_resize());
        assert!(!signals.terminated());
    }
}
