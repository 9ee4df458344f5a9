//! Event types produced by the decoder and consumed by widgets.
//!
//! These enums define the protocol between the input decoder, the
//! engine loop and the widget tree.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Keyboard modifiers held during a key or mouse event.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Shift key held.
        const SHIFT = 0b0000_0001;
        /// Control key held.
        const CTRL = 0b0000_0010;
        /// Alt/Meta key held.
        const ALT = 0b0000_0100;
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Key codes for keyboard input.
///
/// `Char` carries a single printable character; everything else is a
/// symbolic key with one canonical name (see [`KeyCode::name`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// A single character.
    Char(char),
    /// Escape key.
    Esc,
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Tab key.
    Tab,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Insert key.
    Insert,
    /// Home key.
    Home,
    /// Delete key.
    Delete,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Function key (F1-F20).
    F(u8),
    /// Sentinel for an unresolvable byte sequence.
    Invalid,
}

/// Symbolic names accepted in key specs, in canonical spelling.
pub(crate) const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("esc", KeyCode::Esc),
    ("enter", KeyCode::Enter),
    ("backspace", KeyCode::Backspace),
    ("tab", KeyCode::Tab),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("insert", KeyCode::Insert),
    ("home", KeyCode::Home),
    ("delete", KeyCode::Delete),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("invalid", KeyCode::Invalid),
];

impl KeyCode {
    /// Canonical symbolic name, or `None` for [`KeyCode::Char`].
    pub fn name(self) -> Option<String> {
        match self {
            Self::Char(_) => None,
            Self::F(n) => Some(format!("f{n}")),
            other => NAMED_KEYS
                .iter()
                .find(|(_, code)| *code == other)
                .map(|(name, _)| (*name).to_string()),
        }
    }
}

/// A decoded key press: a key code plus the modifiers held with it.
///
/// Keys built by the decoder and keys parsed from specs are both
/// canonical, so plain `==` is the right comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers held during keypress.
    pub modifiers: Modifiers,
}

impl Key {
    /// The invalid-sequence sentinel.
    pub const INVALID: Self = Self::plain(KeyCode::Invalid);

    /// Create a key with modifiers.
    #[inline]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key without modifiers.
    #[inline]
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    /// Create a plain character key.
    #[inline]
    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// Create a control-modified character key.
    #[inline]
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    /// The character this key types, if it is an unmodified character.
    pub const fn as_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if self.modifiers.is_empty() => Some(c),
            _ => None,
        }
    }

    /// Whether this is the invalid-sequence sentinel.
    pub const fn is_invalid(&self) -> bool {
        matches!(self.code, KeyCode::Invalid)
    }
}

impl fmt::Display for Key {
    /// Formats in key-spec form, e.g. `ctrl alt x` or `shift tab`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(Modifiers::CTRL) {
            f.write_str("ctrl ")?;
        }
        if self.modifiers.contains(Modifiers::ALT) {
            f.write_str("alt ")?;
        }
        if self.modifiers.contains(Modifiers::SHIFT) {
            f.write_str("shift ")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            code => f.write_str(&code.name().unwrap_or_default()),
        }
    }
}

/// Mouse button reported in an X10 mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Right,
    /// Any button released.
    Release,
    /// Wheel scrolled up.
    WheelUp,
    /// Wheel scrolled down.
    WheelDown,
    /// Unrecognised button code.
    Other(u8),
}

impl MouseButton {
    /// Map a raw button code (`low two bits | wheel bit << 6`).
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            3 => Self::Release,
            64 => Self::WheelUp,
            65 => Self::WheelDown,
            other => Self::Other(other),
        }
    }
}

/// Mouse event details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// X coordinate (column), relative to the receiving canvas.
    pub x: u16,
    /// Y coordinate (row), relative to the receiving canvas.
    pub y: u16,
    /// Mouse button involved.
    pub button: MouseButton,
    /// Key modifiers held during mouse event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Decode the three payload bytes of an `ESC [ M` report.
    pub const fn from_x10(b0: u8, b1: u8, b2: u8) -> Self {
        let b = b0.wrapping_sub(32);
        let raw = (b & 3) | (((b >> 6) & 1) << 6);
        let mut modifiers = Modifiers::empty();
        if b & 4 != 0 {
            modifiers = modifiers.union(Modifiers::SHIFT);
        }
        if b & 8 != 0 {
            modifiers = modifiers.union(Modifiers::ALT);
        }
        if b & 16 != 0 {
            modifiers = modifiers.union(Modifiers::CTRL);
        }
        Self {
            x: b1.saturating_sub(33) as u16,
            y: b2.saturating_sub(33) as u16,
            button: MouseButton::from_raw(raw),
            modifiers,
        }
    }

    /// Same event with coordinates shifted into a child's frame.
    ///
    /// Returns `None` if the point lies left of or above the child origin.
    pub fn translated(&self, dx: u16, dy: u16) -> Option<Self> {
        Some(Self {
            x: self.x.checked_sub(dx)?,
            y: self.y.checked_sub(dy)?,
            ..*self
        })
    }
}

/// An input event dispatched through the widget tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(Key),

    /// A mouse report.
    Mouse(MouseEvent),

    /// Terminal was resized. Never produced by the decoder.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl From<Key> for Event {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

impl From<MouseEvent> for Event {
    fn from(mouse: MouseEvent) -> Self {
        Self::Mouse(mouse)
    }
}
