//! Axis Layout Widget: children side by side along one axis.
//!
//! On remodel the children's sizes become [`LayoutSlot`]s (minimum from
//! `min_size`, maximum from `desired_size`) and [`allocate`] decides who
//! is visible and how big. Focus moves among the visible interactive
//! children.
//!
//! Navigation keys are axis-relative: `tab` / `shift tab` always step
//! forward / back, and the ctrl-arrow pair along the axis is remapped to
//! the same steps (`ctrl right` / `ctrl left` in a row, `ctrl down` /
//! `ctrl up` in a column). The cross-axis pair is left alone so it
//! bubbles to an enclosing layout of the other orientation.

use super::traits::{RenderFlags, Widget};
use super::tree::{EventCx, RenderCx, WidgetId, WidgetTree};
use crate::canvas::Canvas;
use crate::input::{Event, Key, KeyCode, Modifiers, MouseButton, MouseEvent};
use crate::layout::{allocate, FocusState, LayoutSlot, Size};
use tracing::trace;

/// Layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Children left to right; width varies.
    Horizontal,
    /// Children top to bottom; height varies.
    #[default]
    Vertical,
}

impl Axis {
    #[inline]
    pub(crate) const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// The (forward, back) arrow keys along this axis.
    pub(crate) const fn arrows(self) -> (KeyCode, KeyCode) {
        match self {
            Self::Horizontal => (KeyCode::Right, KeyCode::Left),
            Self::Vertical => (KeyCode::Down, KeyCode::Up),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Forward,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Visible {
    id: WidgetId,
    offset: u16,
    extent: u16,
}

/// A row or column of weighted children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLayout {
    axis: Axis,
    children: Vec<(WidgetId, u32)>,
    visible: Vec<Visible>,
    focus: FocusState,
}

impl AxisLayout {
    /// Default weight of a child.
    pub const DEFAULT_WEIGHT: u32 = 100;

    /// An empty layout along `axis`.
    pub const fn new(axis: Axis) -> Self {
        Self {
            axis,
            children: Vec::new(),
            visible: Vec::new(),
            focus: FocusState::new(),
        }
    }

    /// An empty horizontal layout.
    pub const fn row() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// An empty vertical layout.
    pub const fn column() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Add a child with the default weight.
    #[must_use]
    pub fn with_child(self, id: WidgetId) -> Self {
        self.with_weighted(id, Self::DEFAULT_WEIGHT)
    }

    /// Add a child with a weight.
    #[must_use]
    pub fn with_weighted(mut self, id: WidgetId, weight: u32) -> Self {
        self.push(id, weight);
        self
    }

    /// Append a child. Request a relayout to place it.
    pub fn push(&mut self, id: WidgetId, weight: u32) {
        self.children.push((id, weight));
    }

    /// The layout direction.
    #[inline]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Handles of the children placed by the last remodel, in order.
    pub fn visible(&self) -> Vec<WidgetId> {
        self.visible.iter().map(|v| v.id).collect()
    }

    /// The selected visible child.
    pub fn selected(&self) -> Option<WidgetId> {
        self.focus.selected().and_then(|i| self.visible.get(i)).map(|v| v.id)
    }

    /// Focus state among the visible children.
    #[inline]
    pub const fn focus(&self) -> &FocusState {
        &self.focus
    }

    fn interactive(&self, tree: &WidgetTree) -> Vec<bool> {
        self.visible.iter().map(|v| tree.is_interactive(v.id)).collect()
    }

    fn step(&self, key: &Key) -> Option<Step> {
        let (forward, back) = self.axis.arrows();
        let (code, mods) = (key.code, key.modifiers);
        if (code == KeyCode::Tab && mods.is_empty()) || (code == forward && mods == Modifiers::CTRL) {
            Some(Step::Forward)
        } else if (code == KeyCode::Tab && mods == Modifiers::SHIFT) || (code == back && mods == Modifiers::CTRL) {
            Some(Step::Back)
        } else {
            None
        }
    }

    /// Index of the visible child under a local point.
    fn hit(&self, x: u16, y: u16) -> Option<usize> {
        let along = if self.axis.is_horizontal() { x } else { y };
        self.visible
            .iter()
            .position(|v| along >= v.offset && along < v.offset.saturating_add(v.extent))
    }
}

impl Widget for AxisLayout {
    fn min_size(&self, tree: &WidgetTree, parent: Size) -> Size {
        let horizontal = self.axis.is_horizontal();
        let (along, across) = self.children.iter().fold((0u16, 0u16), |(along, across), &(id, _)| {
            let min = tree.min_size(id, parent);
            (
                along.saturating_add(min.along(horizontal)),
                across.max(min.along(!horizontal)),
            )
        });
        if horizontal {
            Size::new(along, across)
        } else {
            Size::new(across, along)
        }
    }

    fn desired_size(&self, tree: &WidgetTree, parent: Size) -> Size {
        let horizontal = self.axis.is_horizontal();
        let (along, across) = self.children.iter().fold((0u16, 0u16), |(along, across), &(id, _)| {
            let want = tree.desired_size(id, parent);
            (
                along.saturating_add(want.along(horizontal)),
                across.max(want.along(!horizontal)),
            )
        });
        if horizontal {
            Size::new(along.min(parent.width), across.min(parent.height))
        } else {
            Size::new(across.min(parent.width), along.min(parent.height))
        }
    }

    fn remodel(&mut self, tree: &mut WidgetTree, canvas: Canvas) {
        let horizontal = self.axis.is_horizontal();
        let parent = canvas.size();
        let slots: Vec<LayoutSlot> = self
            .children
            .iter()
            .map(|&(id, weight)| {
                let min = tree.min_size(id, parent).along(horizontal);
                let max = tree.desired_size(id, parent).along(horizontal).max(min);
                LayoutSlot::new().with_weight(weight).with_min(min).with_max(Some(max))
            })
            .collect();
        let allocations = allocate(&slots, parent.along(horizontal));

        let mut placed = vec![false; self.children.len()];
        self.visible = allocations
            .iter()
            .map(|a| {
                placed[a.index] = true;
                Visible {
                    id: self.children[a.index].0,
                    offset: a.offset,
                    extent: a.extent,
                }
            })
            .collect();
        trace!(
            visible = self.visible.len(),
            children = self.children.len(),
            "axis layout remodel"
        );

        for (&(id, _), shown) in self.children.iter().zip(&placed) {
            if !shown {
                tree.remodel(id, Canvas::EMPTY);
            }
        }
        for v in &self.visible {
            let sub = if horizontal {
                canvas.subcanvas(v.offset, 0, Some(v.extent), Some(canvas.height()))
            } else {
                canvas.subcanvas(0, v.offset, Some(canvas.width()), Some(v.extent))
            };
            tree.remodel(v.id, sub);
        }

        let interactive = self.interactive(tree);
        self.focus.sync(&interactive);
    }

    fn render(&self, cx: &mut RenderCx<'_>, _canvas: Canvas, flags: RenderFlags) {
        for (index, v) in self.visible.iter().enumerate() {
            cx.render_child(
                v.id,
                RenderFlags {
                    focused: self.focus.child_focused(flags.focused, index),
                    highlighted: flags.highlighted,
                },
            );
        }
    }

    fn on_key(&mut self, cx: &mut EventCx<'_>, key: &Key) -> bool {
        if let Some(v) = self.focus.focused_child().and_then(|i| self.visible.get(i)) {
            if cx.dispatch(v.id, &Event::Key(*key)) {
                return true;
            }
        }
        match self.step(key) {
            Some(Step::Forward) => {
                let interactive = self.interactive(cx.tree());
                self.focus.next(&interactive)
            }
            Some(Step::Back) => {
                let interactive = self.interactive(cx.tree());
                self.focus.prev(&interactive)
            }
            None if *key == Key::plain(KeyCode::Esc) => self.focus.escape(),
            None => false,
        }
    }

    fn on_mouse(&mut self, cx: &mut EventCx<'_>, mouse: &MouseEvent) -> bool {
        let Some(index) = self.hit(mouse.x, mouse.y) else {
            return false;
        };
        let v = self.visible[index];
        let selected = mouse.button == MouseButton::Release && cx.is_interactive(v.id);
        if selected {
            self.focus.select(index);
        }
        let (dx, dy) = if self.axis.is_horizontal() {
            (v.offset, 0)
        } else {
            (0, v.offset)
        };
        let consumed = mouse
            .translated(dx, dy)
            .is_some_and(|inner| cx.dispatch(v.id, &Event::Mouse(inner)));
        consumed || selected
    }

    fn is_interactive(&self, tree: &WidgetTree) -> bool {
        self.children.iter().any(|&(id, _)| tree.is_interactive(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Buffer, Color};
    use crate::layout::Rect;
    use crate::widget::{Button, Label, TextEntry, Theme};

    fn key(code: KeyCode, modifiers: Modifiers) -> Event {
        Event::Key(Key::new(code, modifiers))
    }

    #[test]
    fn test_weighted_row_split() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(TextEntry::default());
        let b = tree.insert(TextEntry::default());
        let c = tree.insert(TextEntry::default());
        let row = tree.insert(
            AxisLayout::row()
                .with_weighted(a, 100)
                .with_weighted(b, 200)
                .with_weighted(c, 300),
        );
        tree.remodel(row, Canvas::root(30, 1));
        assert_eq!(tree.canvas(a).rect(), Rect::new(0, 0, 5, 1));
        assert_eq!(tree.canvas(b).rect(), Rect::new(5, 0, 10, 1));
        assert_eq!(tree.canvas(c).rect(), Rect::new(15, 0, 15, 1));
    }

    #[test]
    fn test_column_respects_desired_height() {
        let mut tree = WidgetTree::new();
        let title = tree.insert(Label::new("title"));
        let entry = tree.insert(TextEntry::default());
        let col = tree.insert(AxisLayout::column().with_child(title).with_child(entry));
        tree.remodel(col, Canvas::root(20, 10));
        assert_eq!(tree.canvas(title).rect(), Rect::new(0, 0, 20, 1));
        assert_eq!(tree.canvas(entry).rect(), Rect::new(0, 1, 20, 1));
        assert_eq!(tree.get::<AxisLayout>(col).unwrap().selected(), Some(entry));
    }

    #[test]
    fn test_child_dropped_when_too_small() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(Label::new("aaaaaa"));
        let b = tree.insert(Label::new("bbbbbb"));
        let row = tree.insert(AxisLayout::row().with_child(a).with_child(b));
        tree.remodel(row, Canvas::root(8, 1));
        assert_eq!(tree.get::<AxisLayout>(row).unwrap().visible(), vec![b]);
        assert_eq!(tree.canvas(a), Canvas::EMPTY);
        assert_eq!(tree.canvas(b).width(), 6);
    }

    #[test]
    fn test_tab_traversal_skips_labels_and_bubbles_at_end() {
        let mut tree = WidgetTree::new();
        let one = tree.insert(Button::new("1"));
        let gap = tree.insert(Label::new("--"));
        let two = tree.insert(Button::new("2"));
        let row = tree.insert(AxisLayout::row().with_child(one).with_child(gap).with_child(two));
        tree.remodel(row, Canvas::root(30, 1));

        let layout = |tree: &WidgetTree| tree.get::<AxisLayout>(row).unwrap().selected();
        assert_eq!(layout(&tree), Some(one));
        assert!(tree.dispatch(row, &key(KeyCode::Tab, Modifiers::empty())));
        assert_eq!(layout(&tree), Some(two));
        assert!(!tree.dispatch(row, &key(KeyCode::Tab, Modifiers::empty())));
        assert!(tree.dispatch(row, &key(KeyCode::Left, Modifiers::CTRL)));
        assert_eq!(layout(&tree), Some(one));
        assert!(!tree.dispatch(row, &key(KeyCode::Tab, Modifiers::SHIFT)));
        // cross-axis arrows bubble
        assert!(!tree.dispatch(row, &key(KeyCode::Down, Modifiers::CTRL)));
    }

    #[test]
    fn test_focused_child_sees_keys_first() {
        let mut tree = WidgetTree::new();
        let entry = tree.insert(TextEntry::default());
        let col = tree.insert(AxisLayout::column().with_child(entry));
        tree.remodel(col, Canvas::root(10, 2));

        assert!(tree.dispatch(col, &Event::Key(Key::char('q'))));
        assert!(tree.dispatch(col, &key(KeyCode::Esc, Modifiers::empty())));
        assert!(!tree.dispatch(col, &Event::Key(Key::char('r'))));
        assert!(!tree.dispatch(col, &key(KeyCode::Esc, Modifiers::empty())));
        assert_eq!(tree.get::<TextEntry>(entry).unwrap().content(), "q");
    }

    #[test]
    fn test_click_selects_and_forwards() {
        let mut tree = WidgetTree::new();
        let left = tree.insert(Button::new("L"));
        let right = tree.insert(Button::new("R"));
        let row = tree.insert(AxisLayout::row().with_child(left).with_child(right));
        tree.remodel(row, Canvas::root(20, 1));

        let click = MouseEvent {
            x: tree.canvas(right).rect().x + 1,
            y: 0,
            button: MouseButton::Release,
            modifiers: Modifiers::empty(),
        };
        assert!(tree.dispatch(row, &Event::Mouse(click)));
        assert_eq!(tree.get::<AxisLayout>(row).unwrap().selected(), Some(right));
        assert_eq!(tree.get::<Button>(right).unwrap().presses(), 1);
        assert_eq!(tree.get::<Button>(left).unwrap().presses(), 0);
    }

    #[test]
    fn test_render_marks_only_selected_focused() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(Button::new("A"));
        let b = tree.insert(Button::new("B"));
        let row = tree.insert(AxisLayout::row().with_child(a).with_child(b));
        tree.remodel(row, Canvas::root(6, 1));

        let mut buf = Buffer::new(6, 1);
        tree.render(row, &mut buf, &Theme::default(), RenderFlags::FOCUSED);
        assert_eq!(buf.row_text(0), "▌A▐▌B▐");
        assert_eq!(buf.get(1, 0).unwrap().style.fg, Some(Color::Cyan));
        assert_eq!(buf.get(4, 0).unwrap().style.fg, None);
    }

    #[test]
    fn test_empty_layout() {
        let mut tree = WidgetTree::new();
        let row = tree.insert(AxisLayout::row());
        tree.remodel(row, Canvas::root(10, 1));
        assert!(!tree.is_interactive(row));
        assert!(!tree.dispatch(row, &key(KeyCode::Tab, Modifiers::empty())));
        assert_eq!(tree.min_size(row, Size::new(10, 1)), Size::ZERO);
    }
}
