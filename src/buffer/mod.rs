//! Buffer module: Core data structures for the double-buffer rendering system.
//!
//! This module contains:
//! - [`Cell`]: The atomic unit of display
//! - [`Buffer`]: A grid of cells representing the terminal screen
//! - [`Color`], [`Attrs`], [`Style`]: Cell attribute sets
//! - [`diff`]: Diffing engine for generating minimal terminal writes

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;

pub use cell::{Attrs, Cell, Color, Style};
pub use buffer::Buffer;
