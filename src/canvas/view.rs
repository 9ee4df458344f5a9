//! Canvas: a clipped, offset view onto a cell buffer.

use crate::buffer::{Buffer, Cell, Style};
use crate::layout::{Rect, Size};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Box-drawing characters.
pub mod glyphs {
    /// Horizontal line.
    pub const HLINE: char = '─';
    /// Vertical line.
    pub const VLINE: char = '│';
    /// Top-left corner.
    pub const TOP_LEFT: char = '┌';
    /// Top-right corner.
    pub const TOP_RIGHT: char = '┐';
    /// Bottom-left corner.
    pub const BOTTOM_LEFT: char = '└';
    /// Bottom-right corner.
    pub const BOTTOM_RIGHT: char = '┘';
    /// Stand-in for anything that is not exactly one cell wide.
    pub const REPLACEMENT: char = '\u{FFFD}';
}

/// A rectangular drawing surface.
///
/// A canvas is a value: an absolute origin, its own width and height,
/// and a clip rectangle that is the intersection of its own area with
/// every ancestor's. Writes use canvas-local coordinates and anything
/// outside the clip is dropped silently. Containers hand children fresh
/// canvases on every relayout; nothing holds on to a stale one.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    clip: Rect,
}

impl Canvas {
    /// A zero-sized canvas that drops every write.
    pub const EMPTY: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
        clip: Rect::ZERO,
    };

    /// Root view covering a whole `width` x `height` buffer.
    pub const fn root(width: u16, height: u16) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
            clip: Rect::from_size(width, height),
        }
    }

    /// Declared width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Declared height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Declared size.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Absolute area this canvas declares (before clipping).
    #[inline]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Absolute area writes can actually reach.
    #[inline]
    pub const fn clip(&self) -> Rect {
        self.clip
    }

    /// Whether a canvas-local point is inside the declared area.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// A child view at a local offset.
    ///
    /// `None` for width or height means "whatever is left" of this canvas
    /// past the offset. The child is clipped to this canvas.
    #[must_use]
    pub fn subcanvas(&self, x: u16, y: u16, width: Option<u16>, height: Option<u16>) -> Self {
        let width = width.unwrap_or_else(|| self.width.saturating_sub(x));
        let height = height.unwrap_or_else(|| self.height.saturating_sub(y));
        let origin_x = self.x.saturating_add(x);
        let origin_y = self.y.saturating_add(y);
        let own = Rect::new(origin_x, origin_y, width, height);
        Self {
            x: origin_x,
            y: origin_y,
            width,
            height,
            clip: self.clip.intersection(&own),
        }
    }

    /// Absolute position of a local point, if it survives clipping.
    #[inline]
    fn absolute(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 {
            return None;
        }
        let ax = u16::try_from(i32::from(self.x) + x).ok()?;
        let ay = u16::try_from(i32::from(self.y) + y).ok()?;
        self.clip.contains(ax, ay).then_some((ax, ay))
    }

    /// Put a single cell.
    pub fn put(&self, buf: &mut Buffer, x: i32, y: i32, cell: Cell) {
        if let Some((ax, ay)) = self.absolute(x, y) {
            buf.set(ax, ay, cell);
        }
    }

    /// Write `text` starting at local `(x, y)`, one grapheme per cell.
    ///
    /// Graphemes left of the canvas are skipped, the rest is clipped at
    /// the right edge. Anything that is not exactly one cell wide is
    /// drawn as U+FFFD. Returns the number of cells that landed.
    pub fn write(&self, buf: &mut Buffer, x: i32, y: i32, text: &str, style: Style) -> u16 {
        if y < 0 || y >= i32::from(self.height) {
            return 0;
        }
        let mut written = 0;
        for (col, grapheme) in (x..).zip(text.graphemes(true)) {
            if col >= i32::from(self.width) {
                break;
            }
            if col < 0 {
                continue;
            }
            let ch = match (grapheme.width(), grapheme.chars().next()) {
                (1, Some(c)) => c,
                _ => glyphs::REPLACEMENT,
            };
            if let Some((ax, ay)) = self.absolute(col, y) {
                buf.set(ax, ay, Cell::styled(ch, style));
                written += 1;
            }
        }
        written
    }

    /// Fill a local rectangle with `cell`.
    pub fn fill(&self, buf: &mut Buffer, x: u16, y: u16, width: u16, height: u16, cell: Cell) {
        let area = self.subcanvas(x, y, Some(width), Some(height)).clip;
        buf.fill_rect(area.x, area.y, area.width, area.height, cell);
    }

    /// Blank the whole canvas.
    pub fn clear(&self, buf: &mut Buffer) {
        let area = self.clip;
        buf.fill_rect(area.x, area.y, area.width, area.height, Cell::EMPTY);
    }

    /// Blank one row.
    pub fn clear_line(&self, buf: &mut Buffer, y: u16) {
        self.fill(buf, 0, y, self.width, 1, Cell::EMPTY);
    }

    /// Horizontal line of `len` cells.
    pub fn draw_hline(&self, buf: &mut Buffer, x: u16, y: u16, len: u16, style: Style) {
        self.fill(buf, x, y, len, 1, Cell::styled(glyphs::HLINE, style));
    }

    /// Vertical line of `len` cells.
    pub fn draw_vline(&self, buf: &mut Buffer, x: u16, y: u16, len: u16, style: Style) {
        self.fill(buf, x, y, 1, len, Cell::styled(glyphs::VLINE, style));
    }

    /// Outline a box whose outer size is `width` x `height`.
    ///
    /// Boxes narrower or shorter than 2 cells are not drawn.
    pub fn draw_box(&self, buf: &mut Buffer, x: u16, y: u16, width: u16, height: u16, style: Style) {
        if width < 2 || height < 2 {
            return;
        }
        let right = x.saturating_add(width - 1);
        let bottom = y.saturating_add(height - 1);
        self.draw_hline(buf, x.saturating_add(1), y, width - 2, style);
        self.draw_hline(buf, x.saturating_add(1), bottom, width - 2, style);
        self.draw_vline(buf, x, y.saturating_add(1), height - 2, style);
        self.draw_vline(buf, right, y.saturating_add(1), height - 2, style);
        let (x, y, right, bottom) = (
            i32::from(x),
            i32::from(y),
            i32::from(right),
            i32::from(bottom),
        );
        self.put(buf, x, y, Cell::styled(glyphs::TOP_LEFT, style));
        self.put(buf, right, y, Cell::styled(glyphs::TOP_RIGHT, style));
        self.put(buf, x, bottom, Cell::styled(glyphs::BOTTOM_LEFT, style));
        self.put(buf, right, bottom, Cell::styled(glyphs::BOTTOM_RIGHT, style));
    }

    /// Outline the whole canvas and return the view inside the border.
    pub fn draw_border(&self, buf: &mut Buffer, style: Style) -> Self {
        self.draw_box(buf, 0, 0, self.width, self.height, style);
        self.inset(1)
    }

    /// The view `margin` cells in from every edge.
    #[must_use]
    pub fn inset(&self, margin: u16) -> Self {
        let twice = margin.saturating_mul(2);
        self.subcanvas(
            margin,
            margin,
            Some(self.width.saturating_sub(twice)),
            Some(self.height.saturating_sub(twice)),
        )
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Canvas({}, {} {}x{} clip={:?})",
            self.x, self.y, self.width, self.height, self.clip
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Attrs, Color};

    #[test]
    fn test_write_negative_x_clips_left() {
        let mut buf = Buffer::new(10, 1);
        let canvas = Canvas::root(10, 1);
        let n = canvas.write(&mut buf, -2, 0, "hello", Style::PLAIN);
        assert_eq!(n, 3);
        assert_eq!(buf.row_text(0), "llo       ");
    }

    #[test]
    fn test_write_clips_right_and_rows() {
        let mut buf = Buffer::new(6, 2);
        let canvas = Canvas::root(6, 2);
        canvas.write(&mut buf, 3, 0, "abcdef", Style::PLAIN);
        canvas.write(&mut buf, 0, 2, "nope", Style::PLAIN);
        canvas.write(&mut buf, 0, -1, "nope", Style::PLAIN);
        assert_eq!(buf.row_text(0), "   abc");
        assert_eq!(buf.row_text(1), "      ");
    }

    #[test]
    fn test_nested_offsets_compose() {
        let mut buf = Buffer::new(20, 10);
        let root = Canvas::root(20, 10);
        let a = root.subcanvas(2, 1, None, None);
        let b = a.subcanvas(3, 2, Some(4), Some(1));
        b.write(&mut buf, 0, 0, "xyzzy", Style::PLAIN);

        assert_eq!(b.rect(), Rect::new(5, 3, 4, 1));
        assert_eq!(buf.row_text(3), "     xyzz           ");
    }

    #[test]
    fn test_child_clipped_to_parent() {
        let mut buf = Buffer::new(20, 10);
        let parent = Canvas::root(20, 10).subcanvas(0, 0, Some(5), Some(2));
        let child = parent.subcanvas(3, 0, Some(10), None);
        assert_eq!(child.width(), 10);
        child.write(&mut buf, 0, 0, "abcdef", Style::PLAIN);
        assert_eq!(buf.row_text(0), "   ab               ");
    }

    #[test]
    fn test_default_remaining_space() {
        let root = Canvas::root(20, 10);
        let sub = root.subcanvas(15, 8, None, None);
        assert_eq!(sub.size(), Size::new(5, 2));
        let past = root.subcanvas(25, 0, None, None);
        assert_eq!(past.width(), 0);
    }

    #[test]
    fn test_wide_graphemes_replaced() {
        let mut buf = Buffer::new(4, 1);
        Canvas::root(4, 1).write(&mut buf, 0, 0, "a日é", Style::PLAIN);
        assert_eq!(buf.row_text(0), "a\u{FFFD}é ");
    }

    #[test]
    fn test_write_style() {
        let mut buf = Buffer::new(4, 1);
        let style = Style::fg(Color::Green).with_attrs(Attrs::BOLD);
        Canvas::root(4, 1).write(&mut buf, 1, 0, "x", style);
        assert_eq!(buf.get(1, 0).unwrap().style, style);
    }

    #[test]
    fn test_draw_border_returns_inset() {
        let mut buf = Buffer::new(5, 3);
        let inner = Canvas::root(5, 3).draw_border(&mut buf, Style::PLAIN);
        assert_eq!(buf.row_text(0), "┌───┐");
        assert_eq!(buf.row_text(1), "│   │");
        assert_eq!(buf.row_text(2), "└───┘");
        assert_eq!(inner.rect(), Rect::new(1, 1, 3, 1));
    }

    #[test]
    fn test_empty_canvas_drops_everything() {
        let mut buf = Buffer::new(4, 1);
        let canvas = Canvas::EMPTY;
        assert_eq!(canvas.write(&mut buf, 0, 0, "abc", Style::PLAIN), 0);
        canvas.clear(&mut buf);
        canvas.draw_box(&mut buf, 0, 0, 4, 1, Style::PLAIN);
        assert_eq!(buf.row_text(0), "    ");
    }
}
