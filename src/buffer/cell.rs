//! Cell: The atomic unit of terminal display.
//!
//! # Memory Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Cell Layout (8 bytes)                       │
//! ├─────────────┬──────┬──────┬───────┬──────────┤
//! │  ch (char)  │  fg  │  bg  │ attrs │ padding  │
//! │  4 bytes    │  1b  │  1b  │  1b   │  1b      │
//! └─────────────┴──────┴──────┴───────┴──────────┘
//! ```
//!
//! Colors are `Option<Color>` so a style can leave them unset and inherit
//! from whatever was painted underneath.

use bitflags::bitflags;

/// One of the eight basic terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Color 0.
    Black,
    /// Color 1.
    Red,
    /// Color 2.
    Green,
    /// Color 3.
    Yellow,
    /// Color 4.
    Blue,
    /// Color 5.
    Magenta,
    /// Color 6.
    Cyan,
    /// Color 7.
    White,
}

impl Color {
    /// All colors, in palette order.
    pub const ALL: [Self; 8] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// Palette index (0-7), used to pick the capability string.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

bitflags! {
    /// Text attributes.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use gridloom::Attrs;
    /// let style = Attrs::BOLD | Attrs::UNDERLINE;
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attrs: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Underlined text
        const UNDERLINE = 0b0000_0010;
        /// Reversed colors (fg/bg swapped)
        const INVERSE = 0b0000_0100;
        /// Dim/faint text
        const DIM = 0b0000_1000;
    }
}

impl std::fmt::Debug for Attrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Attribute set carried by a cell: optional colors plus flags.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color, `None` = terminal default.
    pub fg: Option<Color>,
    /// Background color, `None` = terminal default.
    pub bg: Option<Color>,
    /// Text attributes.
    pub attrs: Attrs,
}

impl Style {
    /// No colors, no attributes.
    pub const PLAIN: Self = Self {
        fg: None,
        bg: None,
        attrs: Attrs::empty(),
    };

    /// Style with only a foreground color.
    #[inline]
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Self::PLAIN
        }
    }

    /// Set the foreground color.
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, color: Option<Color>) -> Self {
        self.fg = color;
        self
    }

    /// Set the background color.
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, color: Option<Color>) -> Self {
        self.bg = color;
        self
    }

    /// Add attributes.
    #[inline]
    #[must_use]
    pub const fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = self.attrs.union(attrs);
        self
    }

    /// Layer `over` on top of `self`: set colors win, attributes combine.
    #[inline]
    #[must_use]
    pub const fn patch(self, over: Self) -> Self {
        Self {
            fg: match over.fg {
                Some(c) => Some(c),
                None => self.fg,
            },
            bg: match over.bg {
                Some(c) => Some(c),
                None => self.bg,
            },
            attrs: self.attrs.union(over.attrs),
        }
    }
}

impl std::fmt::Debug for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Style(fg={:?} bg={:?} {:?})", self.fg, self.bg, self.attrs)
    }
}

/// A single terminal cell: one single-width character and its style.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The displayed character.
    pub ch: char,
    /// Colors and attributes.
    pub style: Style,
}

// Compile-time assertion: keep cells small so grids stay cache-friendly
const _: () = assert!(std::mem::size_of::<Cell>() == 8, "Cell must be 8 bytes");

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell (space, plain style).
    pub const EMPTY: Self = Self {
        ch: ' ',
        style: Style::PLAIN,
    };

    /// Create a cell with the plain style.
    #[inline]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            style: Style::PLAIN,
        }
    }

    /// Create a cell with a style.
    #[inline]
    pub const fn styled(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    /// Set the foreground color.
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, color: Color) -> Self {
        self.style.fg = Some(color);
        self
    }

    /// Set the background color.
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, color: Color) -> Self {
        self.style.bg = Some(color);
        self
    }

    /// Add attributes.
    #[inline]
    #[must_use]
    pub const fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.style.attrs = self.style.attrs.union(attrs);
        self
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.style == Style::PLAIN {
            write!(f, "Cell({:?})", self.ch)
        } else {
            write!(f, "Cell({:?}, {:?})", self.ch, self.style)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size() {
        assert_eq!(std::mem::size_of::<Cell>(), 8);
    }

    #[test]
    fn test_cell_builders() {
        let cell = Cell::new('x')
            .with_fg(Color::Red)
            .with_bg(Color::Blue)
            .with_attrs(Attrs::BOLD);
        assert_eq!(cell.ch, 'x');
        assert_eq!(cell.style.fg, Some(Color::Red));
        assert_eq!(cell.style.bg, Some(Color::Blue));
        assert!(cell.style.attrs.contains(Attrs::BOLD));
    }

    #[test]
    fn test_style_patch() {
        let base = Style::fg(Color::White).with_bg(Some(Color::Black));
        let over = Style::fg(Color::Cyan).with_attrs(Attrs::INVERSE);
        let merged = base.patch(over);
        assert_eq!(merged.fg, Some(Color::Cyan));
        assert_eq!(merged.bg, Some(Color::Black));
        assert_eq!(merged.attrs, Attrs::INVERSE);
    }

    #[test]
    fn test_color_index() {
        for (i, c) in Color::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn test_empty_equality() {
        assert_eq!(Cell::default(), Cell::EMPTY);
        assert_ne!(Cell::new(' ').with_attrs(Attrs::INVERSE), Cell::EMPTY);
    }
}
