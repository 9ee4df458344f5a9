//! Layout module: space allocation along an axis and focus traversal.
//!
//! Allocation runs only on remodel (resize or content-size change);
//! rendering never recomputes placement.

mod engine;
mod focus;
mod rect;

pub use engine::{allocate, Allocation, LayoutSlot};
pub use focus::FocusState;
pub use rect::{Rect, Size};
