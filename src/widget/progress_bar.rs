//! Progress Bar Widget: Horizontal progress indicator.
//!
//! A horizontal progress bar with selectable glyphs and an optional
//! percentage centered over the bar. Where the percentage overlaps the
//! filled part it is drawn inverse.

use super::theme::StyleKey;
use super::traits::{RenderFlags, Widget};
use super::tree::{RenderCx, WidgetTree};
use crate::buffer::{Attrs, Style};
use crate::canvas::Canvas;
use crate::layout::Size;

/// Visual style for the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressStyle {
    /// Classic solid bar: ████████░░░░
    #[default]
    Solid,
    /// ASCII style: ========
    Ascii,
    /// Block characters: ▓▓▓▓▓▓░░░░
    Block,
    /// Thin line: ───────────
    Line,
}

impl ProgressStyle {
    /// The filled and empty characters.
    const fn chars(self) -> (char, char) {
        match self {
            Self::Solid => ('█', '░'),
            Self::Ascii => ('=', ' '),
            Self::Block => ('▓', '░'),
            Self::Line => ('─', ' '),
        }
    }
}

/// A horizontal progress bar widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    /// Current progress (0.0 to 1.0).
    progress: f32,
    /// Glyph set.
    style: ProgressStyle,
    /// Whether to overlay the percentage.
    show_percentage: bool,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBar {
    /// Create an empty bar with the percentage shown.
    pub const fn new() -> Self {
        Self {
            progress: 0.0,
            style: ProgressStyle::Solid,
            show_percentage: true,
        }
    }

    /// Use a different glyph set.
    #[must_use]
    pub const fn with_style(mut self, style: ProgressStyle) -> Self {
        self.style = style;
        self
    }

    /// Show or hide the percentage.
    #[must_use]
    pub const fn with_percentage(mut self, show: bool) -> Self {
        self.show_percentage = show;
        self
    }

    /// Set the progress value (clamped to 0.0-1.0).
    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    /// Get the current progress value.
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Increment progress by a delta (clamped).
    pub fn increment(&mut self, delta: f32) {
        self.set_progress(self.progress + delta);
    }

    /// Check if progress is complete (>= 1.0).
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Number of filled cells out of `width`.
    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    fn filled(&self, width: u16) -> u16 {
        // progress is clamped, so the product is within 0..=width
        (self.progress * f32::from(width)).floor() as u16
    }
}

impl Widget for ProgressBar {
    fn min_size(&self, _tree: &WidgetTree, _parent: Size) -> Size {
        Size::new(4, 1)
    }

    fn desired_size(&self, _tree: &WidgetTree, parent: Size) -> Size {
        Size::new(parent.width, 1)
    }

    #[allow(clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    fn render(&self, cx: &mut RenderCx<'_>, canvas: Canvas, _flags: RenderFlags) {
        let width = canvas.width();
        let full = self.filled(width);
        let (filled_char, empty_char) = self.style.chars();
        let filled_style = cx.style(StyleKey::ProgressFilled);
        let empty_style = cx.style(StyleKey::ProgressEmpty);

        let bar: Vec<char> = (0..width)
            .map(|i| if i < full { filled_char } else { empty_char })
            .collect();
        let label: Vec<char> = if self.show_percentage && width > 4 {
            format!("{}", (self.progress * 100.0).floor() as u32).chars().collect()
        } else {
            Vec::new()
        };
        let label_start = (usize::from(width) - label.len()) / 2;

        for (i, &glyph) in bar.iter().enumerate() {
            let x = i32::try_from(i).unwrap_or(i32::MAX);
            let on_filled = i < usize::from(full);
            let (ch, style) = match i.checked_sub(label_start).and_then(|at| label.get(at)) {
                Some(&digit) if on_filled => (
                    digit,
                    filled_style.patch(Style::PLAIN.with_attrs(Attrs::INVERSE)),
                ),
                Some(&digit) => (digit, empty_style),
                None if on_filled => (glyph, filled_style),
                None => (glyph, empty_style),
            };
            canvas.write(cx.buffer(), x, 0, ch.encode_utf8(&mut [0; 4]), style);
        }
    }

    fn is_interactive(&self, _tree: &WidgetTree) -> bool {
        false
    }
}
