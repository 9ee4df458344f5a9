//! Widget Tree: an arena of widgets addressed by stable handles.
//!
//! Each node owns a boxed widget and its current canvas binding. The
//! binding is replaced wholesale on every remodel. While a widget handles
//! an event or remodels, it is taken out of its slot so it can reach the
//! rest of the tree mutably; its own slot reads as empty until it is put
//! back.

use super::theme::{StyleKey, Theme};
use super::traits::{RenderFlags, Widget};
use crate::buffer::{Buffer, Style};
use crate::canvas::Canvas;
use crate::input::Event;
use crate::layout::Size;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable handle to a widget in a [`WidgetTree`].
    pub struct WidgetId;
}

struct Node {
    widget: Option<Box<dyn Widget>>,
    canvas: Canvas,
}

/// Owner of every widget in an application.
#[derive(Default)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, Node>,
    root: Option<WidgetId>,
    relayout: bool,
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a widget, returning its handle.
    pub fn insert(&mut self, widget: impl Widget) -> WidgetId {
        self.nodes.insert(Node {
            widget: Some(Box::new(widget)),
            canvas: Canvas::EMPTY,
        })
    }

    /// Remove a widget. Containers still holding the handle see an empty slot.
    pub fn remove(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        self.nodes.remove(id).and_then(|node| node.widget)
    }

    /// Whether `id` names a live node.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of widgets.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no widgets.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Set the widget the engine lays out and dispatches to.
    pub fn set_root(&mut self, id: WidgetId) {
        self.root = Some(id);
        self.relayout = true;
    }

    /// The root widget.
    #[inline]
    pub const fn root(&self) -> Option<WidgetId> {
        self.root
    }

    /// Typed access to a widget.
    pub fn get<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        let widget: &dyn Widget = self.nodes.get(id)?.widget.as_deref()?;
        widget.as_any().downcast_ref()
    }

    /// Typed mutable access to a widget.
    ///
    /// Changing anything that affects size should be followed by
    /// [`request_relayout`](Self::request_relayout).
    pub fn get_mut<W: Widget>(&mut self, id: WidgetId) -> Option<&mut W> {
        let widget: &mut dyn Widget = self.nodes.get_mut(id)?.widget.as_deref_mut()?;
        widget.as_any_mut().downcast_mut()
    }

    /// Canvas currently bound to `id`.
    pub fn canvas(&self, id: WidgetId) -> Canvas {
        self.nodes.get(id).map_or(Canvas::EMPTY, |node| node.canvas)
    }

    /// Ask for the root to be remodelled before the next render.
    pub fn request_relayout(&mut self) {
        self.relayout = true;
    }

    /// Consume a pending relayout request.
    pub fn take_relayout(&mut self) -> bool {
        std::mem::take(&mut self.relayout)
    }

    fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.nodes.get(id)?.widget.as_deref()
    }

    /// Minimum size of `id`; zero for missing widgets.
    pub fn min_size(&self, id: WidgetId, parent: Size) -> Size {
        self.widget(id).map_or(Size::ZERO, |w| w.min_size(self, parent))
    }

    /// Desired size of `id`; zero for missing widgets.
    pub fn desired_size(&self, id: WidgetId, parent: Size) -> Size {
        self.widget(id).map_or(Size::ZERO, |w| w.desired_size(self, parent))
    }

    /// Whether `id` takes focus.
    pub fn is_interactive(&self, id: WidgetId) -> bool {
        self.widget(id).is_some_and(|w| w.is_interactive(self))
    }

    /// Bind `canvas` to `id` and let it place its children.
    pub fn remodel(&mut self, id: WidgetId, canvas: Canvas) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.canvas = canvas;
        let Some(mut widget) = node.widget.take() else {
            return;
        };
        widget.remodel(self, canvas);
        self.put_back(id, widget);
    }

    /// Deliver `event` to `id`. Returns whether it was consumed.
    pub fn dispatch(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        let canvas = node.canvas;
        let Some(mut widget) = node.widget.take() else {
            return false;
        };
        let consumed = widget.on_event(&mut EventCx { tree: self, canvas }, event);
        self.put_back(id, widget);
        consumed
    }

    fn put_back(&mut self, id: WidgetId, widget: Box<dyn Widget>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
    }

    /// Paint `id` into `buffer` through its bound canvas.
    pub fn render(&self, id: WidgetId, buffer: &mut Buffer, theme: &Theme, flags: RenderFlags) {
        RenderCx {
            tree: self,
            buffer,
            theme,
        }
        .render_child(id, flags);
    }
}

impl std::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetTree")
            .field("nodes", &self.nodes.len())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// What a widget sees while painting.
pub struct RenderCx<'a> {
    tree: &'a WidgetTree,
    buffer: &'a mut Buffer,
    theme: &'a Theme,
}

impl RenderCx<'_> {
    /// The pending grid. Write to it only through a [`Canvas`].
    #[inline]
    pub fn buffer(&mut self) -> &mut Buffer {
        self.buffer
    }

    /// The active theme.
    #[inline]
    pub const fn theme(&self) -> &Theme {
        self.theme
    }

    /// Resolve a theme element.
    #[inline]
    pub fn style(&self, key: StyleKey) -> Style {
        self.theme.get(key)
    }

    /// The tree, for sizing queries.
    #[inline]
    pub const fn tree(&self) -> &WidgetTree {
        self.tree
    }

    /// Render a child through its own bound canvas.
    pub fn render_child(&mut self, id: WidgetId, flags: RenderFlags) {
        let tree = self.tree;
        let Some(node) = tree.nodes.get(id) else {
            return;
        };
        if let Some(widget) = node.widget.as_deref() {
            widget.render(self, node.canvas, flags);
        }
    }
}

/// What a widget sees while handling an event.
pub struct EventCx<'a> {
    tree: &'a mut WidgetTree,
    canvas: Canvas,
}

impl EventCx<'_> {
    /// The handling widget's bound canvas.
    #[inline]
    pub const fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Shared access to the rest of the tree.
    #[inline]
    pub fn tree(&self) -> &WidgetTree {
        self.tree
    }

    /// Mutable access to the rest of the tree.
    #[inline]
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        self.tree
    }

    /// Forward an event to a child.
    pub fn dispatch(&mut self, child: WidgetId, event: &Event) -> bool {
        self.tree.dispatch(child, event)
    }

    /// Rebind a child.
    pub fn remodel(&mut self, child: WidgetId, canvas: Canvas) {
        self.tree.remodel(child, canvas);
    }

    /// Whether a child takes focus.
    pub fn is_interactive(&self, child: WidgetId) -> bool {
        self.tree.is_interactive(child)
    }

    /// Ask the engine to remodel from the root.
    pub fn request_relayout(&mut self) {
        self.tree.request_relayout();
    }
}
