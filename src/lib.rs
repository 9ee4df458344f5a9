//! # Gridloom
//!
//! A character-cell terminal UI toolkit.
//!
//! Gridloom turns raw terminal bytes into key and mouse events, lays out a
//! tree of widgets on the screen grid, and redraws only the cells that
//! changed since the last frame.
//!
//! ## Core Concepts
//!
//! - **Decoder trie**: a prebuilt byte trie over the terminal's escape
//!   sequences; feeding input in any chunking yields the same events
//! - **Diffing canvas**: widgets paint into clipped views of a pending grid;
//!   a commit writes only the changed cells
//! - **Layout and focus**: containers split their canvas by priority
//!   weights and track which child receives keys
//! - **Widget contract**: sizing, remodel, render and event hooks shared
//!   by leaves and containers
//!
//! ## Example
//!
//! ```
//! use gridloom::terminal::MemoryChannel;
//! use gridloom::widget::{AxisLayout, Button, Label, WidgetTree};
//! use gridloom::{Engine, EngineConfig, Outcome};
//!
//! let mut tree = WidgetTree::new();
//! let title = tree.insert(Label::new("Gridloom"));
//! let ok = tree.insert(Button::new("OK"));
//! let root = tree.insert(AxisLayout::column().with_child(title).with_child(ok));
//! tree.set_root(root);
//!
//! let channel = MemoryChannel::new(20, 4);
//! let mut engine: Engine<_, ()> =
//!     Engine::with_channel(channel, tree, EngineConfig::default()).unwrap();
//! engine.channel_mut().push_input(b"\r".to_vec());
//! assert_eq!(engine.step().unwrap(), Outcome::Consumed);
//! assert_eq!(engine.tree().get::<Button>(ok).unwrap().presses(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod canvas;
pub mod engine;
pub mod error;
pub mod input;
pub mod layout;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use buffer::{Attrs, Buffer, Cell, Color, Style};
pub use canvas::{Canvas, RootCanvas};
pub use engine::{Engine, EngineConfig, Outcome};
pub use error::{Error, KeySpecError, Result};
pub use input::{Decoder, Event, Key, KeyCode, Keymap, Modifiers, MouseButton, MouseEvent};
pub use layout::{Rect, Size};
pub use widget::{Widget, WidgetId, WidgetTree};
