//! Input: turning raw terminal bytes into [`Event`]s.
//!
//! This module contains:
//! - [`Event`], [`Key`], [`MouseEvent`]: the decoded event protocol
//! - [`keyspec`]: the `"[modifier ...] name"` mini-language and canonicalisation
//! - [`table`]: the standard xterm escape-sequence table
//! - [`Automaton`] / [`Decoder`]: trie matcher and streaming decoder
//! - [`Keymap`]: application bindings

mod automaton;
mod event;
mod keymap;
pub mod keyspec;
pub mod table;

pub use automaton::{Automaton, Decoder};
pub use event::{Event, Key, KeyCode, Modifiers, MouseButton, MouseEvent};
pub use keymap::Keymap;
