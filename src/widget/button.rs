//! Button Widget: a pressable caption.

use super::theme::StyleKey;
use super::traits::{RenderFlags, Widget};
use super::tree::{EventCx, RenderCx, WidgetTree};
use super::text_width;
use crate::buffer::{Attrs, Style};
use crate::canvas::Canvas;
use crate::input::{Key, KeyCode, MouseButton, MouseEvent};
use crate::layout::Size;

type Callback = Box<dyn FnMut()>;

/// A caption drawn between half blocks, pressed with enter, space or a click.
pub struct Button {
    text: String,
    on_press: Option<Callback>,
    presses: u32,
}

impl Button {
    /// Create a button with no callback.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            on_press: None,
            presses: 0,
        }
    }

    /// Run `callback` on every press.
    #[must_use]
    pub fn on_press(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_press = Some(Box::new(callback));
        self
    }

    /// The caption.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// How many times the button has been pressed.
    #[inline]
    pub const fn presses(&self) -> u32 {
        self.presses
    }

    /// Press the button.
    pub fn press(&mut self) {
        self.presses = self.presses.wrapping_add(1);
        if let Some(callback) = self.on_press.as_mut() {
            callback();
        }
    }
}

impl Widget for Button {
    fn min_size(&self, _tree: &WidgetTree, _parent: Size) -> Size {
        Size::new(3, 1)
    }

    fn desired_size(&self, _tree: &WidgetTree, _parent: Size) -> Size {
        Size::new(text_width(&self.text).saturating_add(2), 1)
    }

    fn render(&self, cx: &mut RenderCx<'_>, canvas: Canvas, flags: RenderFlags) {
        let mut style = cx.style(if flags.focused {
            StyleKey::ButtonTextFocused
        } else {
            StyleKey::ButtonText
        });
        if flags.highlighted {
            style = style.patch(Style::PLAIN.with_attrs(Attrs::INVERSE));
        }
        let inner: String = self
            .text
            .chars()
            .take(usize::from(canvas.width().saturating_sub(2)))
            .collect();
        canvas.write(cx.buffer(), 0, 0, &format!("\u{258C}{inner}\u{2590}"), style);
    }

    fn on_key(&mut self, _cx: &mut EventCx<'_>, key: &Key) -> bool {
        if *key == Key::plain(KeyCode::Enter) || key.as_char() == Some(' ') {
            self.press();
            return true;
        }
        false
    }

    fn on_mouse(&mut self, _cx: &mut EventCx<'_>, mouse: &MouseEvent) -> bool {
        if mouse.button == MouseButton::Release {
            self.press();
            return true;
        }
        false
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.text)
            .field("presses", &self.presses)
            .finish_non_exhaustive()
    }
}
