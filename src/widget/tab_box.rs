//! Tab Box Widget: one visible child at a time under a header row.

use super::theme::StyleKey;
use super::traits::{RenderFlags, Widget};
use super::tree::{EventCx, RenderCx, WidgetId, WidgetTree};
use super::text_width;
use crate::canvas::Canvas;
use crate::input::{Event, Key, KeyCode, Modifiers, MouseButton, MouseEvent};
use crate::layout::Size;

/// Shows the selected tab's body below a row of tab titles.
///
/// Switching is external: call [`select`](Self::select) (and request a
/// relayout) or click a title. Hidden tabs are bound to an empty canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabBox {
    tabs: Vec<(String, WidgetId)>,
    selected: usize,
    focused: bool,
}

impl TabBox {
    /// Create an empty tab box.
    pub const fn new() -> Self {
        Self {
            tabs: Vec::new(),
            selected: 0,
            focused: true,
        }
    }

    /// Add a tab.
    #[must_use]
    pub fn with_tab(mut self, title: impl Into<String>, body: WidgetId) -> Self {
        self.tabs.push((title.into(), body));
        self
    }

    /// Index of the shown tab.
    #[inline]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Number of tabs.
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Whether there are no tabs.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Show tab `index`. Returns `false` if it does not exist.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        self.selected = index;
        true
    }

    fn current(&self) -> Option<WidgetId> {
        self.tabs.get(self.selected).map(|&(_, id)| id)
    }

    /// Header as `(start column, width)` per tab: ` title ` cells.
    fn header(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        let mut x = 0u16;
        self.tabs.iter().map(move |(title, _)| {
            let width = text_width(title).saturating_add(2);
            let start = x;
            x = x.saturating_add(width);
            (start, width)
        })
    }
}

impl Default for TabBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TabBox {
    fn min_size(&self, tree: &WidgetTree, parent: Size) -> Size {
        let header = self.header().last().map_or(0, |(x, w)| x.saturating_add(w));
        let body = self.current().map_or(Size::ZERO, |id| {
            tree.min_size(id, Size::new(parent.width, parent.height.saturating_sub(1)))
        });
        Size::new(body.width.max(header.min(parent.width)), body.height.saturating_add(1))
    }

    fn desired_size(&self, _tree: &WidgetTree, parent: Size) -> Size {
        parent
    }

    fn remodel(&mut self, tree: &mut WidgetTree, canvas: Canvas) {
        let body = canvas.subcanvas(0, 1, None, None);
        for (index, &(_, id)) in self.tabs.iter().enumerate() {
            let bound = if index == self.selected { body } else { Canvas::EMPTY };
            tree.remodel(id, bound);
        }
    }

    fn render(&self, cx: &mut RenderCx<'_>, canvas: Canvas, flags: RenderFlags) {
        let active = cx.style(StyleKey::TabActive);
        let inactive = cx.style(StyleKey::TabInactive);
        for (index, ((title, _), (x, _))) in self.tabs.iter().zip(self.header()).enumerate() {
            let style = if index == self.selected { active } else { inactive };
            canvas.write(cx.buffer(), i32::from(x), 0, &format!(" {title} "), style);
        }
        if let Some(id) = self.current() {
            cx.render_child(id, RenderFlags::focused(flags.focused && self.focused));
        }
    }

    fn on_key(&mut self, cx: &mut EventCx<'_>, key: &Key) -> bool {
        if let Some(id) = self.current() {
            if self.focused && cx.dispatch(id, &Event::Key(*key)) {
                return true;
            }
        }
        let tab = key.code == KeyCode::Tab
            && (key.modifiers.is_empty() || key.modifiers == Modifiers::SHIFT);
        if *key == Key::plain(KeyCode::Esc) && self.focused {
            self.focused = false;
            true
        } else if tab && !self.focused {
            self.focused = true;
            true
        } else {
            false
        }
    }

    fn on_mouse(&mut self, cx: &mut EventCx<'_>, mouse: &MouseEvent) -> bool {
        if mouse.y == 0 {
            if mouse.button != MouseButton::Release {
                return false;
            }
            let hit = self
                .header()
                .position(|(x, width)| mouse.x >= x && mouse.x < x.saturating_add(width));
            return match hit {
                Some(index) => {
                    self.selected = index;
                    self.focused = true;
                    cx.request_relayout();
                    true
                }
                None => false,
            };
        }
        match (self.current(), mouse.translated(0, 1)) {
            (Some(id), Some(inner)) => cx.dispatch(id, &Event::Mouse(inner)),
            _ => false,
        }
    }

    fn is_interactive(&self, tree: &WidgetTree) -> bool {
        self.current().is_some_and(|id| tree.is_interactive(id))
    }
}
