//! Terminal: capability tables and the device channel.
//!
//! - [`Capabilities`]: named control strings for one terminal type
//! - [`Channel`]: what the engine reads from and writes to
//! - [`TtyChannel`]: the real terminal in raw mode
//! - [`MemoryChannel`]: scripted input and captured output for tests
//! - [`OutputBuffer`]: collects a frame before the single write

mod capabilities;
mod channel;
mod output;
mod signals;
mod tty;

pub use capabilities::{Capabilities, Capability};
pub use channel::{Channel, MemoryChannel};
pub use output::OutputBuffer;
pub use signals::Signals;
pub use tty::{TtyChannel, TtyOptions, TtyRestorer};
