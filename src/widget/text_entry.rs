//! Text Entry Widget: single-line editable text with a cursor.
//!
//! The cursor is a character index. When the content is wider than the
//! canvas, the visible window scrolls to keep the cursor in view; the
//! window start is updated on edits and on remodel, never while
//! rendering.

use super::theme::StyleKey;
use super::traits::{RenderFlags, Widget};
use super::tree::{EventCx, RenderCx, WidgetTree};
use crate::buffer::{Attrs, Style};
use crate::canvas::Canvas;
use crate::input::{Key, KeyCode};
use crate::layout::Size;

/// Drawn after the content of a focused entry.
const PADDING: char = '\u{00B7}';

/// A single-line text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    /// Current text content.
    content: String,
    /// Cursor position in characters.
    cursor: usize,
    /// First visible character.
    start: usize,
    /// Limit on the number of characters.
    max_length: Option<usize>,
    /// Width of the last bound canvas.
    width: u16,
}

impl TextEntry {
    /// Create an entry holding `content`, cursor at the start.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            cursor: 0,
            start: 0,
            max_length: None,
            width: 0,
        }
    }

    /// Refuse insertions past `max` characters.
    #[must_use]
    pub const fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Get the current text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Set the content, moving cursor to end.
    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.cursor = self.len();
        self.follow();
    }

    /// Clear the content.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.start = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Cursor position in characters.
    #[inline]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of character `index`.
    fn byte_at(&self, index: usize) -> usize {
        self.content
            .char_indices()
            .nth(index)
            .map_or(self.content.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor position.
    fn insert_char(&mut self, c: char) -> bool {
        if self.max_length.is_some_and(|max| self.len() >= max) {
            return false;
        }
        let at = self.byte_at(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor.
    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_at(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor.
    fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_at(self.cursor);
            self.content.remove(at);
        }
    }

    /// Keep the cursor inside the visible window.
    fn follow(&mut self) {
        let width = usize::from(self.width);
        if width == 0 {
            self.start = self.cursor;
        } else if self.cursor < self.start {
            self.start = self.cursor;
        } else if self.cursor >= self.start + width {
            self.start = self.cursor + 1 - width;
        }
    }
}

impl Default for TextEntry {
    fn default() -> Self {
        Self::new("")
    }
}

impl Widget for TextEntry {
    fn min_size(&self, _tree: &WidgetTree, _parent: Size) -> Size {
        Size::new(3, 1)
    }

    fn desired_size(&self, _tree: &WidgetTree, parent: Size) -> Size {
        Size::new(parent.width, 1)
    }

    fn remodel(&mut self, _tree: &mut WidgetTree, canvas: Canvas) {
        self.width = canvas.width();
        self.follow();
    }

    fn render(&self, cx: &mut RenderCx<'_>, canvas: Canvas, flags: RenderFlags) {
        let width = usize::from(canvas.width());
        let mut style = cx.style(if flags.focused {
            StyleKey::EntryTextFocused
        } else {
            StyleKey::EntryText
        });
        if flags.highlighted {
            style = style.patch(Style::PLAIN.with_attrs(Attrs::INVERSE));
        }
        let visible: String = self.content.chars().skip(self.start).take(width).collect();
        canvas.write(cx.buffer(), 0, 0, &visible, style);
        if !flags.focused {
            return;
        }

        let shown = visible.chars().count();
        let padding: String = std::iter::repeat(PADDING).take(width.saturating_sub(shown)).collect();
        let pad_style = cx.style(StyleKey::EntryPadding);
        canvas.write(cx.buffer(), i32::try_from(shown).unwrap_or(i32::MAX), 0, &padding, pad_style);

        let column = self.cursor.saturating_sub(self.start);
        if column < width {
            let under = visible.chars().nth(column).unwrap_or(PADDING);
            let cursor_style = style.patch(Style::PLAIN.with_attrs(Attrs::UNDERLINE));
            let x = i32::try_from(column).unwrap_or(i32::MAX);
            canvas.write(cx.buffer(), x, 0, under.encode_utf8(&mut [0; 4]), cursor_style);
        }
    }

    fn on_key(&mut self, _cx: &mut EventCx<'_>, key: &Key) -> bool {
        let consumed = match (key.code, key.modifiers.is_empty()) {
            (KeyCode::Left, true) => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            (KeyCode::Right, true) => {
                self.cursor = (self.cursor + 1).min(self.len());
                true
            }
            (KeyCode::Backspace, true) => {
                self.backspace();
                true
            }
            (KeyCode::Delete, true) => {
                self.delete();
                true
            }
            (KeyCode::Home, true) => {
                self.cursor = 0;
                true
            }
            (KeyCode::End, true) => {
                self.cursor = self.len();
                true
            }
            _ => key.as_char().is_some_and(|c| self.insert_char(c)),
        };
        if consumed {
            self.follow();
        }
        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::input::{Event, Modifiers};
    use crate::widget::Theme;

    fn typed(tree: &mut WidgetTree, id: crate::widget::WidgetId, text: &str) {
        for c in text.chars() {
            assert!(tree.dispatch(id, &Event::Key(Key::char(c))));
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(Key::plain(code))
    }

    #[test]
    fn test_text_entry_basic() {
        let mut entry = TextEntry::default();
        entry.insert_char('H');
        entry.insert_char('i');
        assert_eq!(entry.content(), "Hi");
        assert_eq!(entry.cursor(), 2);
    }

    #[test]
    fn test_text_entry_editing_keys() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(TextEntry::default());
        typed(&mut tree, id, "héllo");
        tree.dispatch(id, &key(KeyCode::Left));
        tree.dispatch(id, &key(KeyCode::Backspace));
        tree.dispatch(id, &key(KeyCode::Home));
        tree.dispatch(id, &key(KeyCode::Delete));
        let entry = tree.get::<TextEntry>(id).unwrap();
        assert_eq!(entry.content(), "élo");
        assert_eq!(entry.cursor(), 0);
    }

    #[test]
    fn test_text_entry_ignores_modified_and_navigation() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(TextEntry::default());
        assert!(!tree.dispatch(id, &Event::Key(Key::ctrl('a'))));
        assert!(!tree.dispatch(id, &key(KeyCode::Tab)));
        assert!(!tree.dispatch(id, &key(KeyCode::Down)));
        assert!(!tree.dispatch(id, &Event::Key(Key::new(KeyCode::Left, Modifiers::CTRL))));
    }

    #[test]
    fn test_text_entry_max_length() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(TextEntry::default().with_max_length(2));
        typed(&mut tree, id, "ab");
        assert!(!tree.dispatch(id, &Event::Key(Key::char('c'))));
        assert_eq!(tree.get::<TextEntry>(id).unwrap().content(), "ab");
    }

    #[test]
    fn test_text_entry_scrolls_with_cursor() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(TextEntry::default());
        tree.remodel(id, Canvas::root(4, 1));
        typed(&mut tree, id, "abcdef");

        let mut buf = Buffer::new(4, 1);
        tree.render(id, &mut buf, &Theme::default(), RenderFlags::FOCUSED);
        // cursor sits after 'f' on the last column
        assert_eq!(buf.row_text(0), "def·");
        assert!(buf.get(3, 0).unwrap().style.attrs.contains(Attrs::UNDERLINE));

        tree.dispatch(id, &key(KeyCode::Home));
        tree.render(id, &mut buf, &Theme::default(), RenderFlags::FOCUSED);
        assert_eq!(buf.row_text(0), "abcd");
    }

    #[test]
    fn test_text_entry_unfocused_has_no_padding() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(TextEntry::new("ab"));
        tree.remodel(id, Canvas::root(5, 1));
        let mut buf = Buffer::new(5, 1);
        tree.render(id, &mut buf, &Theme::default(), RenderFlags::NONE);
        assert_eq!(buf.row_text(0), "ab   ");
    }
}
