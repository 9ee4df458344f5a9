//! Widget trait: the contract every leaf and container implements.

use super::tree::{EventCx, RenderCx, WidgetTree};
use crate::canvas::Canvas;
use crate::input::{Event, Key, MouseEvent};
use crate::layout::Size;
use std::any::Any;

/// Flags a parent passes down when rendering a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderFlags {
    /// The child is on the active focus chain.
    pub focused: bool,
    /// The child is the current selection of a focused list.
    pub highlighted: bool,
}

impl RenderFlags {
    /// Neither focused nor highlighted.
    pub const NONE: Self = Self {
        focused: false,
        highlighted: false,
    };

    /// Focused, not highlighted.
    pub const FOCUSED: Self = Self {
        focused: true,
        highlighted: false,
    };

    /// Flags with only `focused` set to the given value.
    #[inline]
    pub const fn focused(focused: bool) -> Self {
        Self {
            focused,
            highlighted: false,
        }
    }
}

/// Upcasting helper so boxed widgets can be downcast to their concrete type.
pub trait AsAny: Any {
    /// `self` as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// `self` as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A UI component living in a [`WidgetTree`].
///
/// Widgets never hold their own canvas: the tree stores the binding and
/// replaces it on every remodel. Containers refer to their children by
/// [`WidgetId`](super::WidgetId) and reach them through the tree or the
/// context passed in.
pub trait Widget: AsAny {
    /// Smallest size the widget can be drawn in, given the parent's size.
    fn min_size(&self, tree: &WidgetTree, parent: Size) -> Size;

    /// Size the widget would like, given the parent's size.
    fn desired_size(&self, tree: &WidgetTree, parent: Size) -> Size;

    /// Layout phase: the tree has just bound `canvas` to this widget.
    ///
    /// Containers place their children here. Leaves usually do nothing.
    fn remodel(&mut self, tree: &mut WidgetTree, canvas: Canvas) {
        let _ = (tree, canvas);
    }

    /// Paint into `canvas` (the bound surface).
    ///
    /// Must not change layout state; it only reads `self`.
    fn render(&self, cx: &mut RenderCx<'_>, canvas: Canvas, flags: RenderFlags);

    /// Handle an event, returning whether it was consumed.
    ///
    /// Keys go to [`on_key`](Self::on_key), mouse reports to
    /// [`on_mouse`](Self::on_mouse). Nothing else is consumed.
    fn on_event(&mut self, cx: &mut EventCx<'_>, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.on_key(cx, key),
            Event::Mouse(mouse) => self.on_mouse(cx, mouse),
            Event::Resize { .. } => false,
        }
    }

    /// Handle a key press.
    fn on_key(&mut self, cx: &mut EventCx<'_>, key: &Key) -> bool {
        let _ = (cx, key);
        false
    }

    /// Handle a mouse report, in canvas-local coordinates.
    fn on_mouse(&mut self, cx: &mut EventCx<'_>, mouse: &MouseEvent) -> bool {
        let _ = (cx, mouse);
        false
    }

    /// Whether the widget takes focus.
    fn is_interactive(&self, tree: &WidgetTree) -> bool {
        let _ = tree;
        true
    }
}
