//! Canvas module: clipped drawing views over a double-buffered screen.
//!
//! This module contains:
//! - [`Canvas`]: a copyable, offset and clipped view; all widget painting goes through it
//! - [`RootCanvas`]: owns the pending/committed grids and produces the per-frame diff
//! - [`glyphs`]: box-drawing characters

mod root;
mod view;

pub use root::RootCanvas;
pub use view::{glyphs, Canvas};
