//! Capabilities: the terminal control strings the canvas emits.
//!
//! A closed set of named operations resolved once per terminal type.
//! The strings themselves come from crossterm's command encoders; the
//! canvas never builds escape sequences on its own.

use crate::buffer::{Attrs, Color};
use crossterm::{cursor, style, terminal, Command};
use std::fmt;

/// Named terminal operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Clear the whole screen.
    Clear,
    /// Reset all attributes and colors.
    AttributeReset,
    /// Bold on.
    Bold,
    /// Underline on.
    Underline,
    /// Inverse video on.
    Inverse,
    /// Dim on.
    Dim,
    /// Hide the cursor.
    CursorHide,
    /// Show the cursor.
    CursorShow,
    /// Enable X10-encoded mouse reports.
    MouseOn,
    /// Disable mouse reports.
    MouseOff,
}

impl Capability {
    /// Number of named operations.
    pub const COUNT: usize = 10;

    /// Every capability, in table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Clear,
        Self::AttributeReset,
        Self::Bold,
        Self::Underline,
        Self::Inverse,
        Self::Dim,
        Self::CursorHide,
        Self::CursorShow,
        Self::MouseOn,
        Self::MouseOff,
    ];

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }
}

/// Writes `fmt::Write` output straight into a byte vector.
struct ByteSink<'a>(&'a mut Vec<u8>);

impl fmt::Write for ByteSink<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

fn encode(command: impl Command) -> Vec<u8> {
    let mut out = Vec::new();
    // ByteSink never fails
    let _ = command.write_ansi(&mut ByteSink(&mut out));
    out
}

const fn crossterm_color(color: Color) -> style::Color {
    match color {
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
    }
}

/// Resolved capability table for one terminal type.
#[derive(Clone)]
pub struct Capabilities {
    strings: [Vec<u8>; Capability::COUNT],
    fg: [Vec<u8>; 8],
    bg: [Vec<u8>; 8],
    name: String,
}

impl Capabilities {
    /// Full ANSI/xterm table.
    pub fn ansi() -> Self {
        let strings = Capability::ALL.map(|cap| match cap {
            Capability::Clear => encode(terminal::Clear(terminal::ClearType::All)),
            Capability::AttributeReset => encode(style::SetAttribute(style::Attribute::Reset)),
            Capability::Bold => encode(style::SetAttribute(style::Attribute::Bold)),
            Capability::Underline => encode(style::SetAttribute(style::Attribute::Underlined)),
            Capability::Inverse => encode(style::SetAttribute(style::Attribute::Reverse)),
            Capability::Dim => encode(style::SetAttribute(style::Attribute::Dim)),
            Capability::CursorHide => encode(cursor::Hide),
            Capability::CursorShow => encode(cursor::Show),
            Capability::MouseOn => b"\x1b[?1000h".to_vec(),
            Capability::MouseOff => b"\x1b[?1000l".to_vec(),
        });
        Self {
            strings,
            fg: Color::ALL.map(|c| encode(style::SetForegroundColor(crossterm_color(c)))),
            bg: Color::ALL.map(|c| encode(style::SetBackgroundColor(crossterm_color(c)))),
            name: "ansi".to_string(),
        }
    }

    /// ANSI positioning with attributes but no colors (vt100 class).
    pub fn monochrome() -> Self {
        Self {
            fg: Default::default(),
            bg: Default::default(),
            name: "monochrome".to_string(),
            ..Self::ansi()
        }
    }

    /// Positioning only; no attributes, colors or mouse.
    pub fn dumb() -> Self {
        let mut caps = Self::monochrome();
        for cap in [
            Capability::Bold,
            Capability::Underline,
            Capability::Inverse,
            Capability::Dim,
            Capability::MouseOn,
            Capability::MouseOff,
        ] {
            caps.strings[cap.slot()].clear();
        }
        caps.name = "dumb".to_string();
        caps
    }

    /// Pick a table for a `$TERM` value.
    pub fn for_terminal(term: Option<&str>) -> Self {
        match term {
            None | Some("" | "dumb") => Self::dumb(),
            Some(t) if t.starts_with("vt1") || t.starts_with("vt2") => Self::monochrome(),
            Some(_) => Self::ansi(),
        }
    }

    /// Table name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The string for a named operation (may be empty if unsupported).
    #[inline]
    pub fn get(&self, cap: Capability) -> &[u8] {
        &self.strings[cap.slot()]
    }

    /// Append a named operation.
    #[inline]
    pub fn emit(&self, out: &mut Vec<u8>, cap: Capability) {
        out.extend_from_slice(self.get(cap));
    }

    /// Append a cursor move to column `x`, row `y` (0-indexed).
    #[inline]
    pub fn move_to(&self, out: &mut Vec<u8>, x: u16, y: u16) {
        let _ = cursor::MoveTo(x, y).write_ansi(&mut ByteSink(out));
    }

    /// Append a foreground color.
    #[inline]
    pub fn set_fg(&self, out: &mut Vec<u8>, color: Color) {
        out.extend_from_slice(&self.fg[color.index()]);
    }

    /// Append a background color.
    #[inline]
    pub fn set_bg(&self, out: &mut Vec<u8>, color: Color) {
        out.extend_from_slice(&self.bg[color.index()]);
    }

    /// Append the on-strings for a set of attributes.
    pub fn set_attrs(&self, out: &mut Vec<u8>, attrs: Attrs) {
        for (flag, cap) in [
            (Attrs::BOLD, Capability::Bold),
            (Attrs::UNDERLINE, Capability::Underline),
            (Attrs::INVERSE, Capability::Inverse),
            (Attrs::DIM, Capability::Dim),
        ] {
            if attrs.contains(flag) {
                self.emit(out, cap);
            }
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::ansi()
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
