//! List Box Widget: a windowed, scrollable run of item widgets.
//!
//! The list is either navigating (arrow keys move the selection) or
//! editing the selected item (keys go to the item first). Only the items
//! inside the current window are bound to canvases; the rest get an
//! empty canvas. The window start follows the selection.
//!
//! A vertical list stacks items top to bottom and steps with up / down.
//! A horizontal list lays them left to right, one blank column apart,
//! and steps with left / right.

use super::axis::Axis;
use super::traits::{RenderFlags, Widget};
use super::tree::{EventCx, RenderCx, WidgetId, WidgetTree};
use crate::canvas::Canvas;
use crate::input::{Event, Key, KeyCode, MouseButton, MouseEvent};
use crate::layout::Size;
use std::ops::Range;

/// How far page up / page down move the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageStep {
    /// One full window: as many items as are currently shown.
    #[default]
    Window,
    /// A fixed number of items.
    Rows(usize),
}

/// List box behaviour knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListBoxConfig {
    /// Page up / page down distance.
    pub page_step: PageStep,
}

/// Interaction state of a list box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Keys move the selection.
    #[default]
    Navigating,
    /// Keys go to the selected item first.
    EditingSelected,
}

/// A scrollable list of widgets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListBox {
    axis: Axis,
    items: Vec<WidgetId>,
    selected: usize,
    first: usize,
    shown: Range<usize>,
    mode: ListMode,
    config: ListBoxConfig,
}

impl ListBox {
    /// Create a vertical list over `items`.
    pub fn new(items: Vec<WidgetId>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Create a horizontal list over `items`.
    pub fn horizontal(items: Vec<WidgetId>) -> Self {
        Self::new(items).with_axis(Axis::Horizontal)
    }

    /// Lay items out along `axis`.
    #[must_use]
    pub const fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Use `config` instead of the defaults.
    #[must_use]
    pub const fn with_config(mut self, config: ListBoxConfig) -> Self {
        self.config = config;
        self
    }

    /// The direction items are laid out in.
    #[inline]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// The items, in order.
    pub fn items(&self) -> &[WidgetId] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item. Request a relayout to show it.
    pub fn push(&mut self, item: WidgetId) {
        self.items.push(item);
    }

    /// Remove the item at `index`, keeping the selection in range.
    pub fn remove(&mut self, index: usize) -> Option<WidgetId> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
        self.first = self.first.min(self.selected);
        if self.items.is_empty() {
            self.mode = ListMode::Navigating;
        }
        Some(item)
    }

    /// Index of the selected item (0 when empty).
    #[inline]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Index of the first item in the window.
    #[inline]
    pub const fn window_start(&self) -> usize {
        self.first
    }

    /// Indices of the items currently bound to a canvas.
    pub fn window(&self) -> Range<usize> {
        self.shown.clone()
    }

    /// Current interaction state.
    #[inline]
    pub const fn mode(&self) -> ListMode {
        self.mode
    }

    /// Select `index` (clamped). Request a relayout to scroll to it.
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.items.len().saturating_sub(1));
        self.mode = ListMode::Navigating;
    }

    /// Blank cells left after each item along the axis.
    const fn gap(&self) -> u16 {
        if self.axis.is_horizontal() {
            1
        } else {
            0
        }
    }

    /// Cells item `item` takes along the axis, not counting the gap.
    fn extent_of(&self, tree: &WidgetTree, item: WidgetId, size: Size) -> u16 {
        tree.desired_size(item, size)
            .along(self.axis.is_horizontal())
            .max(1)
    }

    /// Move the window start so the selection fits.
    fn follow(&mut self, tree: &WidgetTree, size: Size) {
        if self.items.is_empty() {
            self.first = 0;
            return;
        }
        if self.selected < self.first {
            self.first = self.selected;
            return;
        }
        let room = u32::from(size.along(self.axis.is_horizontal()));
        let gap = u32::from(self.gap());
        let cost = |item: WidgetId| u32::from(self.extent_of(tree, item, size)) + gap;
        let span: u32 = self.items[self.first..=self.selected]
            .iter()
            .map(|&item| cost(item))
            .sum();
        if span - gap <= room {
            return;
        }
        // walk back from the selection until the window is full
        let mut used = 0u32;
        let mut first = self.selected;
        for index in (0..=self.selected).rev() {
            used += cost(self.items[index]);
            if used - gap > room {
                break;
            }
            first = index;
        }
        self.first = first;
    }

    /// Bind the items inside the window, unbind everything else.
    fn rebind(&mut self, tree: &mut WidgetTree, canvas: Canvas) {
        let size = canvas.size();
        let horizontal = self.axis.is_horizontal();
        let room = size.along(horizontal);
        let mut at = 0u16;
        let mut end = self.first;
        for (index, &item) in self.items.iter().enumerate() {
            if index < self.first || at >= room {
                tree.remodel(item, Canvas::EMPTY);
                continue;
            }
            let extent = self.extent_of(tree, item, size).min(room - at);
            let bound = if horizontal {
                canvas.subcanvas(at, 0, Some(extent), None)
            } else {
                canvas.subcanvas(0, at, None, Some(extent))
            };
            tree.remodel(item, bound);
            at = at.saturating_add(extent).saturating_add(self.gap());
            end = index + 1;
        }
        self.shown = self.first..end;
    }

    fn page(&self) -> usize {
        match self.config.page_step {
            PageStep::Window => self.shown.len().max(1),
            PageStep::Rows(n) => n.max(1),
        }
    }

    fn navigate(&mut self, key: &Key) -> bool {
        if !key.modifiers.is_empty() {
            return false;
        }
        let (forward, back) = self.axis.arrows();
        let last = self.items.len().saturating_sub(1);
        self.selected = match key.code {
            code if code == forward => (self.selected + 1).min(last),
            code if code == back => self.selected.saturating_sub(1),
            KeyCode::PageDown => (self.selected + self.page()).min(last),
            KeyCode::PageUp => self.selected.saturating_sub(self.page()),
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => return false,
        };
        true
    }

    fn scroll(&mut self, cx: &mut EventCx<'_>) {
        let canvas = cx.canvas();
        self.follow(cx.tree(), canvas.size());
        self.rebind(cx.tree_mut(), canvas);
    }
}

impl Widget for ListBox {
    fn min_size(&self, _tree: &WidgetTree, _parent: Size) -> Size {
        Size::new(5, 2)
    }

    fn desired_size(&self, _tree: &WidgetTree, parent: Size) -> Size {
        parent
    }

    fn remodel(&mut self, tree: &mut WidgetTree, canvas: Canvas) {
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
        self.follow(tree, canvas.size());
        self.rebind(tree, canvas);
    }

    fn render(&self, cx: &mut RenderCx<'_>, _canvas: Canvas, flags: RenderFlags) {
        for index in self.shown.clone() {
            let Some(&item) = self.items.get(index) else {
                break;
            };
            let current = index == self.selected;
            cx.render_child(
                item,
                RenderFlags {
                    focused: flags.focused && current && self.mode == ListMode::EditingSelected,
                    highlighted: flags.focused && current,
                },
            );
        }
    }

    fn on_key(&mut self, cx: &mut EventCx<'_>, key: &Key) -> bool {
        let Some(&item) = self.items.get(self.selected) else {
            return false;
        };
        match self.mode {
            ListMode::EditingSelected => {
                if cx.dispatch(item, &Event::Key(*key)) {
                    return true;
                }
                if *key == Key::plain(KeyCode::Esc) {
                    self.mode = ListMode::Navigating;
                    return true;
                }
                false
            }
            ListMode::Navigating => {
                if *key == Key::plain(KeyCode::Enter) && cx.is_interactive(item) {
                    self.mode = ListMode::EditingSelected;
                    return true;
                }
                if !self.navigate(key) {
                    return false;
                }
                self.scroll(cx);
                true
            }
        }
    }

    fn on_mouse(&mut self, cx: &mut EventCx<'_>, mouse: &MouseEvent) -> bool {
        let origin = cx.canvas().rect();
        let horizontal = self.axis.is_horizontal();
        let (base, point) = if horizontal {
            (origin.x, mouse.x)
        } else {
            (origin.y, mouse.y)
        };
        let point = base.saturating_add(point);
        let span = |area: crate::layout::Rect| {
            if horizontal {
                (area.x, area.right())
            } else {
                (area.y, area.bottom())
            }
        };
        let hit = self.shown.clone().find(|&index| {
            let area = cx.tree().canvas(self.items[index]).rect();
            let (start, end) = span(area);
            !area.is_empty() && point >= start && point < end
        });
        let Some(index) = hit else {
            return false;
        };
        let item = self.items[index];
        if mouse.button == MouseButton::Release && index != self.selected {
            self.selected = index;
            self.mode = ListMode::Navigating;
            self.scroll(cx);
            return true;
        }
        let area = cx.tree().canvas(item).rect();
        let (dx, dy) = (area.x.saturating_sub(origin.x), area.y.saturating_sub(origin.y));
        mouse
            .translated(dx, dy)
            .is_some_and(|inner| cx.dispatch(item, &Event::Mouse(inner)))
    }

    fn is_interactive(&self, _tree: &WidgetTree) -> bool {
        !self.items.is_empty()
    }
}
