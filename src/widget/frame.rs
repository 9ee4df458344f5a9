//! Frame Widget: a titled border around one child.

use super::theme::StyleKey;
use super::traits::{RenderFlags, Widget};
use super::tree::{EventCx, RenderCx, WidgetId, WidgetTree};
use crate::canvas::Canvas;
use crate::input::{Event, Key, MouseEvent};
use crate::layout::Size;

/// Draws a border and title, insetting its body by one cell on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    title: String,
    body: WidgetId,
}

impl Frame {
    /// Frame `body` under `title`.
    pub fn new(title: impl Into<String>, body: WidgetId) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }

    /// The framed child.
    #[inline]
    pub const fn body(&self) -> WidgetId {
        self.body
    }

    /// The title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}

const fn shrink(size: Size) -> Size {
    Size::new(size.width.saturating_sub(2), size.height.saturating_sub(2))
}

const fn grow(size: Size) -> Size {
    Size::new(size.width.saturating_add(2), size.height.saturating_add(2))
}

impl Widget for Frame {
    fn min_size(&self, tree: &WidgetTree, parent: Size) -> Size {
        grow(tree.min_size(self.body, shrink(parent)))
    }

    fn desired_size(&self, tree: &WidgetTree, parent: Size) -> Size {
        grow(tree.desired_size(self.body, shrink(parent)))
    }

    fn remodel(&mut self, tree: &mut WidgetTree, canvas: Canvas) {
        tree.remodel(self.body, canvas.inset(1));
    }

    fn render(&self, cx: &mut RenderCx<'_>, canvas: Canvas, flags: RenderFlags) {
        let (border, title) = if flags.focused {
            (StyleKey::FrameBorderFocused, StyleKey::FrameTitleFocused)
        } else {
            (StyleKey::FrameBorder, StyleKey::FrameTitle)
        };
        let border = cx.style(border);
        let title_style = cx.style(title);
        canvas.draw_border(cx.buffer(), border);
        let title: String = self
            .title
            .chars()
            .take(usize::from(canvas.width().saturating_sub(2)))
            .collect();
        canvas.write(cx.buffer(), 1, 0, &title, title_style);
        cx.render_child(self.body, RenderFlags::focused(flags.focused));
    }

    fn on_key(&mut self, cx: &mut EventCx<'_>, key: &Key) -> bool {
        cx.dispatch(self.body, &Event::Key(*key))
    }

    fn on_mouse(&mut self, cx: &mut EventCx<'_>, mouse: &MouseEvent) -> bool {
        mouse
            .translated(1, 1)
            .is_some_and(|inner| cx.dispatch(self.body, &Event::Mouse(inner)))
    }

    fn is_interactive(&self, tree: &WidgetTree) -> bool {
        tree.is_interactive(self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Buffer, Color};
    use crate::input::{KeyCode, Modifiers, MouseButton};
    use crate::widget::{Button, Label, TextEntry, Theme};

    #[test]
    fn test_frame_sizes_wrap_body() {
        let mut tree = WidgetTree::new();
        let body = tree.insert(Label::new("hello"));
        let frame = tree.insert(Frame::new("T", body));
        assert_eq!(tree.min_size(frame, Size::new(80, 24)), Size::new(7, 3));
        assert_eq!(tree.desired_size(frame, Size::new(80, 24)), Size::new(7, 3));
        assert!(!tree.is_interactive(frame));
    }

    #[test]
    fn test_frame_renders_border_title_body() {
        let mut tree = WidgetTree::new();
        let body = tree.insert(TextEntry::new("abc"));
        let frame = tree.insert(Frame::new("Name field", body));
        tree.remodel(frame, Canvas::root(8, 3));
        assert_eq!(tree.canvas(body).rect(), crate::layout::Rect::new(1, 1, 6, 1));

        let mut buf = Buffer::new(8, 3);
        tree.render(frame, &mut buf, &Theme::default(), RenderFlags::FOCUSED);
        assert_eq!(buf.row_text(0), "┌Name f┐");
        assert_eq!(buf.row_text(1), "│abc···│");
        assert_eq!(buf.row_text(2), "└──────┘");
        assert_eq!(buf.get(0, 0).unwrap().style.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_frame_forwards_events() {
        let mut tree = WidgetTree::new();
        let body = tree.insert(Button::new("go"));
        let frame = tree.insert(Frame::new("", body));
        tree.remodel(frame, Canvas::root(6, 3));

        assert!(tree.dispatch(frame, &Event::Key(Key::plain(KeyCode::Enter))));
        let click = MouseEvent {
            x: 2,
            y: 1,
            button: MouseButton::Release,
            modifiers: Modifiers::empty(),
        };
        assert!(tree.dispatch(frame, &Event::Mouse(click)));
        let on_border = MouseEvent { x: 0, ..click };
        assert!(!tree.dispatch(frame, &Event::Mouse(on_border)));
        assert_eq!(tree.get::<Button>(body).unwrap().presses(), 2);
    }
}
