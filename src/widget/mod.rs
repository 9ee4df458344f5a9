//! Widgets: the arena, the widget contract and the built-in widget set.
//!
//! # Architecture
//!
//! Every widget lives in a [`WidgetTree`] and is addressed by a
//! [`WidgetId`]. Containers hold the ids of their children, never the
//! children themselves. A frame goes through three phases:
//!
//! 1. **Remodel**: the tree binds a fresh [`Canvas`](crate::canvas::Canvas)
//!    to a widget; containers split theirs and remodel their children.
//! 2. **Render**: widgets paint through their bound canvas. Rendering
//!    reads widget state but never changes it.
//! 3. **Events**: keys travel down the focus chain; each container offers
//!    the key to its focused child first and handles it itself only if
//!    the child declines.
//!
//! # Example
//!
//! ```
//! use gridloom::canvas::Canvas;
//! use gridloom::widget::{AxisLayout, Button, Frame, TextEntry, WidgetTree};
//!
//! let mut tree = WidgetTree::new();
//! let name = tree.insert(TextEntry::new(""));
//! let framed = tree.insert(Frame::new("Name", name));
//! let ok = tree.insert(Button::new("OK"));
//! let root = tree.insert(AxisLayout::column().with_child(framed).with_child(ok));
//! tree.set_root(root);
//! tree.remodel(root, Canvas::root(40, 10));
//! assert_eq!(tree.canvas(name).width(), 38);
//! ```

mod axis;
mod button;
mod frame;
mod label;
mod list_box;
mod progress_bar;
mod tab_box;
mod text_entry;
mod theme;
mod traits;
mod tree;

pub use axis::{Axis, AxisLayout};
pub use button::Button;
pub use frame::Frame;
pub use label::Label;
pub use list_box::{ListBox, ListBoxConfig, ListMode, PageStep};
pub use progress_bar::{ProgressBar, ProgressStyle};
pub use tab_box::TabBox;
pub use text_entry::TextEntry;
pub use theme::{StyleKey, Theme};
pub use traits::{AsAny, RenderFlags, Widget};
pub use tree::{EventCx, RenderCx, WidgetId, WidgetTree};

use unicode_segmentation::UnicodeSegmentation;

/// Cells `text` occupies on a canvas (one per grapheme), saturating.
pub(crate) fn text_width(text: &str) -> u16 {
    u16::try_from(text.graphemes(true).count()).unwrap_or(u16::MAX)
}
