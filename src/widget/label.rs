//! Label Widget: one line of static text.

use super::theme::StyleKey;
use super::traits::{RenderFlags, Widget};
use super::tree::{RenderCx, WidgetTree};
use super::text_width;
use crate::buffer::{Attrs, Style};
use crate::canvas::Canvas;
use crate::layout::Size;

/// A non-interactive line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
    style: Option<Style>,
}

impl Label {
    /// Create a label using the theme's label style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// Use a fixed style instead of the theme's.
    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// The text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Label {
    fn min_size(&self, _tree: &WidgetTree, _parent: Size) -> Size {
        Size::new(text_width(&self.text).max(3), 1)
    }

    fn desired_size(&self, _tree: &WidgetTree, _parent: Size) -> Size {
        Size::new(text_width(&self.text), 1)
    }

    fn render(&self, cx: &mut RenderCx<'_>, canvas: Canvas, flags: RenderFlags) {
        let mut style = self.style.unwrap_or_else(|| cx.style(StyleKey::LabelText));
        if flags.highlighted {
            style = style.patch(Style::PLAIN.with_attrs(Attrs::INVERSE));
        }
        let padded = format!("{:<width$}", self.text, width = usize::from(canvas.width()));
        canvas.write(cx.buffer(), 0, 0, &padded, style);
    }

    fn is_interactive(&self, _tree: &WidgetTree) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::widget::Theme;

    #[test]
    fn test_label_sizes() {
        let tree = WidgetTree::new();
        let label = Label::new("ab");
        assert_eq!(label.min_size(&tree, Size::new(80, 24)), Size::new(3, 1));
        assert_eq!(label.desired_size(&tree, Size::new(80, 24)), Size::new(2, 1));
        assert!(!label.is_interactive(&tree));
    }

    #[test]
    fn test_label_pads_and_clips() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(Label::new("status line"));
        let mut buf = Buffer::new(8, 1);
        buf.set(7, 0, crate::buffer::Cell::new('#'));
        tree.remodel(id, Canvas::root(8, 1));
        tree.render(id, &mut buf, &Theme::default(), RenderFlags::NONE);
        assert_eq!(buf.row_text(0), "status l");

        tree.get_mut::<Label>(id).unwrap().set_text("ok");
        tree.render(id, &mut buf, &Theme::default(), RenderFlags::NONE);
        assert_eq!(buf.row_text(0), "ok      ");
    }
}
