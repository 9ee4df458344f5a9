//! Engine: the single-threaded loop that drives a widget tree.
//!
//! One [`Engine::step`] is one iteration:
//!
//! ```text
//! resize / termination flags ──► EventQueue (resize first)
//! Channel::read (timeout) ──► Decoder::feed ──► EventQueue
//!                                   │
//!                          pop one event
//!                                   │
//!        Resize ──► RootCanvas::resize + relayout
//!        Key/Mouse ──► WidgetTree::dispatch ──► (unconsumed key) Keymap
//!                                   │
//!     relayout? ──► WidgetTree::remodel(root canvas)
//!                                   │
//!    RootCanvas::clear ─► WidgetTree::render ─► commit ─► Channel::write_all
//! ```
//!
//! The channel is only touched here. Widgets see canvases.

mod config;
mod queue;

pub use config::{EngineConfig, MOUSE_ENV};
pub use queue::EventQueue;

use crate::canvas::RootCanvas;
use crate::error::Result;
use crate::input::{Automaton, Decoder, Event, Keymap};
use crate::terminal::{Channel, OutputBuffer, TtyChannel};
use crate::widget::{RenderFlags, Theme, WidgetTree};
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// What one [`Engine::step`] did with the event it popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<A> {
    /// No event was ready.
    Idle,
    /// The widget tree (or the engine, for resizes) consumed the event.
    Consumed,
    /// Nothing wanted the event.
    Ignored(Event),
    /// An unconsumed key matched a keymap binding.
    Action(A),
    /// The quit key was pressed or termination was requested.
    Quit,
}

/// Owns the terminal channel, the decoder, the root canvas and the
/// widget tree, and runs the loop between them.
pub struct Engine<C: Channel = TtyChannel, A = ()> {
    config: EngineConfig,
    channel: C,
    decoder: Decoder,
    queue: EventQueue,
    root: RootCanvas,
    output: OutputBuffer,
    tree: WidgetTree,
    theme: Theme,
    keymap: Keymap<A>,
    running: bool,
    frame_count: u64,
}

impl<A: Clone> Engine<TtyChannel, A> {
    /// Open the controlling terminal and build an engine around `tree`.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, size query,
    /// alternate screen).
    pub fn new(tree: WidgetTree, config: EngineConfig) -> Result<Self> {
        let caps = config.capabilities();
        let channel = TtyChannel::open(&caps, config.tty_options())?;
        Self::with_channel(channel, tree, config)
    }
}

impl<C: Channel, A: Clone> Engine<C, A> {
    /// Build an engine on an already-open channel.
    ///
    /// The tree must have a root set (see [`WidgetTree::set_root`]) for
    /// anything to be drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel cannot report its size.
    pub fn with_channel(channel: C, tree: WidgetTree, config: EngineConfig) -> Result<Self> {
        let (width, height) = channel.size()?;
        let automaton = Arc::new(Automaton::standard()?);
        let caps = config.capabilities();
        info!(width, height, terminal = caps.name(), "engine created");
        Ok(Self {
            decoder: Decoder::new(automaton),
            queue: EventQueue::new(),
            root: RootCanvas::new(width, height, caps),
            output: OutputBuffer::new(),
            tree,
            theme: Theme::default(),
            keymap: Keymap::new(),
            running: false,
            frame_count: 0,
            config,
            channel,
        })
    }

    /// Get the configuration.
    #[inline]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The widget tree.
    #[inline]
    pub const fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// The widget tree, mutably. Request a relayout after structural edits.
    #[inline]
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// The active theme.
    #[inline]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the theme. Takes effect on the next frame.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Application keymap consulted for keys the tree does not consume.
    #[inline]
    pub const fn keymap(&self) -> &Keymap<A> {
        &self.keymap
    }

    /// Mutable keymap.
    #[inline]
    pub fn keymap_mut(&mut self) -> &mut Keymap<A> {
        &mut self.keymap
    }

    /// Bind a key spec to an application action.
    ///
    /// # Errors
    ///
    /// Returns an error if `spec` does not parse.
    pub fn bind(&mut self, spec: &str, action: A) -> Result<Option<A>> {
        self.keymap.bind(spec, action)
    }

    /// The channel.
    #[inline]
    pub const fn channel(&self) -> &C {
        &self.channel
    }

    /// The channel, mutably.
    #[inline]
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// The screen double buffer.
    #[inline]
    pub const fn root_canvas(&self) -> &RootCanvas {
        &self.root
    }

    /// Frames committed so far.
    #[inline]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether [`run`](Self::run) is looping.
    #[inline]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Make [`run`](Self::run) return after the current iteration.
    #[inline]
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Recompute the layout before the next frame.
    pub fn request_relayout(&mut self) {
        self.tree.request_relayout();
    }

    /// Force a clear and full redraw on the next frame.
    pub fn invalidate(&mut self) {
        self.root.invalidate();
    }

    /// Queue a resize as if the terminal reported it.
    pub fn inject_resize(&mut self, width: u16, height: u16) {
        self.queue.push_resize(width, height);
    }

    /// Queue an event behind those already pending.
    pub fn push_event(&mut self, event: Event) {
        self.queue.push(event);
    }

    /// Loop until the quit key, a termination signal, [`stop`](Self::stop)
    /// or `on_action` returning [`ControlFlow::Break`]. The terminal is
    /// restored on every way out.
    ///
    /// # Errors
    ///
    /// Returns the first fatal I/O error.
    pub fn run<F>(&mut self, mut on_action: F) -> Result<()>
    where
        F: FnMut(&mut WidgetTree, A) -> ControlFlow<()>,
    {
        self.running = true;
        info!("engine started");
        let result = loop {
            match self.step() {
                Ok(Outcome::Quit) => break Ok(()),
                Ok(Outcome::Action(action)) => {
                    if on_action(&mut self.tree, action).is_break() {
                        break Ok(());
                    }
                }
                Ok(_) => {}
                Err(e) => break Err(e),
            }
            if !self.running {
                break Ok(());
            }
        };
        self.running = false;
        let restored = self.channel.restore();
        info!(frames = self.frame_count, "engine stopped");
        result.and(restored)
    }

    /// Run one loop iteration and draw the resulting frame.
    ///
    /// # Errors
    ///
    /// Returns a fatal channel error, after restoring the terminal.
    pub fn step(&mut self) -> Result<Outcome<A>> {
        match self.iterate() {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(error = %e, "fatal terminal error; restoring");
                if let Err(restore) = self.channel.restore() {
                    warn!(error = %restore, "terminal restore failed");
                }
                Err(e)
            }
        }
    }

    fn iterate(&mut self) -> Result<Outcome<A>> {
        if self.channel.terminated() {
            info!("termination requested");
            return Ok(Outcome::Quit);
        }
        if let Some((width, height)) = self.channel.poll_resize() {
            self.queue.push_resize(width, height);
        }
        if self.queue.is_empty() {
            self.read_input()?;
        }
        let outcome = match self.queue.pop() {
            Some(event) => {
                // widgets are bound to canvases before they see events
                self.relayout();
                self.handle(event)
            }
            None => Outcome::Idle,
        };
        if !matches!(outcome, Outcome::Quit) {
            self.render()?;
        }
        Ok(outcome)
    }

    fn read_input(&mut self) -> Result<()> {
        let Some(bytes) = self.channel.read(Some(self.config.input_poll_timeout))? else {
            return Ok(());
        };
        self.queue.extend(self.decoder.feed(&bytes));
        if self.config.flush_partial_input {
            if let Some(event) = self.decoder.flush() {
                self.queue.push(event);
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: Event) -> Outcome<A> {
        match event {
            Event::Resize { width, height } => {
                debug!(width, height, "terminal resized");
                self.root.resize(width, height);
                self.tree.request_relayout();
                Outcome::Consumed
            }
            Event::Key(key) if key == self.config.quit_key => Outcome::Quit,
            event => {
                let consumed = self
                    .tree
                    .root()
                    .is_some_and(|root| self.tree.dispatch(root, &event));
                if consumed {
                    return Outcome::Consumed;
                }
                if let Event::Key(key) = event {
                    if key.is_invalid() {
                        trace!("invalid input sequence ignored");
                    } else if let Some(action) = self.keymap.lookup(&key) {
                        return Outcome::Action(action.clone());
                    }
                }
                Outcome::Ignored(event)
            }
        }
    }

    fn relayout(&mut self) {
        let Some(root) = self.tree.root() else {
            return;
        };
        if self.tree.take_relayout() {
            debug!(width = self.root.width(), height = self.root.height(), "relayout");
            self.tree.remodel(root, self.root.canvas());
        }
    }

    fn render(&mut self) -> Result<()> {
        let Some(root) = self.tree.root() else {
            return Ok(());
        };
        self.relayout();
        self.root.clear();
        self.tree
            .render(root, self.root.pending_mut(), &self.theme, RenderFlags::FOCUSED);
        self.output.clear();
        self.root.commit(self.output.bytes_mut());
        self.frame_count += 1;
        self.output.flush_to(&mut self.channel)
    }
}

impl<C: Channel + std::fmt::Debug, A> std::fmt::Debug for Engine<C, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("channel", &self.channel)
            .field("root", &self.root)
            .field("queued", &self.queue.len())
            .field("running", &self.running)
            .field("frame_count", &self.frame_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::input::{Key, KeyCode};
    use crate::terminal::MemoryChannel;
    use crate::widget::{AxisLayout, Label, TextEntry, WidgetId};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Act {
        Save,
        Back,
    }

    fn screen_row(output: &[u8], width: u16, height: u16, row: usize) -> String {
        let mut parser = vt100::Parser::new(height, width, 0);
        parser.process(output);
        parser
            .screen()
            .contents()
            .lines()
            .nth(row)
            .unwrap_or("")
            .trim_end()
            .to_string()
    }

    fn label_engine(text: &str) -> (Engine<MemoryChannel, Act>, WidgetId) {
        let mut tree = WidgetTree::new();
        let label = tree.insert(Label::new(text));
        tree.set_root(label);
        let engine =
            Engine::with_channel(MemoryChannel::new(20, 4), tree, EngineConfig::default()).unwrap();
        (engine, label)
    }

    fn entry_engine() -> (Engine<MemoryChannel, Act>, WidgetId) {
        let mut tree = WidgetTree::new();
        let entry = tree.insert(TextEntry::new(""));
        let column = tree.insert(AxisLayout::column().with_child(entry));
        tree.set_root(column);
        let engine =
            Engine::with_channel(MemoryChannel::new(20, 4), tree, EngineConfig::default()).unwrap();
        (engine, entry)
    }

    #[test]
    fn test_first_step_draws_tree() {
        let (mut engine, label) = label_engine("hello");
        assert_eq!(engine.step().unwrap(), Outcome::Idle);
        assert_eq!(engine.frame_count(), 1);
        assert_eq!(engine.tree().canvas(label).width(), 20);
        let out = engine.channel_mut().take_output();
        assert_eq!(screen_row(&out, 20, 4, 0), "hello");
    }

    #[test]
    fn test_idle_step_writes_nothing() {
        let (mut engine, _) = label_engine("hello");
        engine.step().unwrap();
        engine.channel_mut().take_output();
        assert_eq!(engine.step().unwrap(), Outcome::Idle);
        assert!(engine.channel().output().is_empty());
    }

    #[test]
    fn test_typed_keys_reach_focused_entry() {
        let (mut engine, entry) = entry_engine();
        engine.channel_mut().push_input(b"hi".to_vec());
        assert_eq!(engine.step().unwrap(), Outcome::Consumed);
        // the second key was already decoded and queued
        assert_eq!(engine.step().unwrap(), Outcome::Consumed);
        assert_eq!(engine.tree().get::<TextEntry>(entry).unwrap().content(), "hi");
        let out = engine.channel().output().to_vec();
        assert!(screen_row(&out, 20, 4, 0).starts_with("hi"));
    }

    #[test]
    fn test_quit_key_stops_before_dispatch() {
        let (mut engine, entry) = entry_engine();
        engine.channel_mut().push_input(vec![0x03]);
        assert_eq!(engine.step().unwrap(), Outcome::Quit);
        assert!(engine.tree().get::<TextEntry>(entry).unwrap().is_empty());
    }

    #[test]
    fn test_unconsumed_key_falls_back_to_keymap() {
        let (mut engine, _) = label_engine("x");
        engine.bind("ctrl s", Act::Save).unwrap();
        engine.channel_mut().push_input(vec![0x13, b'z']);
        assert_eq!(engine.step().unwrap(), Outcome::Action(Act::Save));
        assert_eq!(
            engine.step().unwrap(),
            Outcome::Ignored(Event::Key(Key::char('z')))
        );
    }

    #[test]
    fn test_lone_escape_flushed_at_chunk_end() {
        let (mut engine, _) = label_engine("x");
        engine.bind("esc", Act::Back).unwrap();
        engine.channel_mut().push_input(vec![0x1b]);
        assert_eq!(engine.step().unwrap(), Outcome::Action(Act::Back));
    }

    #[test]
    fn test_partial_sequence_held_without_flush() {
        let mut tree = WidgetTree::new();
        let label = tree.insert(Label::new("x"));
        tree.set_root(label);
        let config = EngineConfig {
            flush_partial_input: false,
            ..EngineConfig::default()
        };
        let mut engine: Engine<MemoryChannel, Act> =
            Engine::with_channel(MemoryChannel::new(10, 2), tree, config).unwrap();
        engine.channel_mut().push_input(vec![0x1b, b'[']);
        assert_eq!(engine.step().unwrap(), Outcome::Idle);
        engine.channel_mut().push_input(b"A".to_vec());
        assert_eq!(
            engine.step().unwrap(),
            Outcome::Ignored(Event::Key(Key::plain(KeyCode::Up)))
        );
    }

    #[test]
    fn test_resize_rebinds_and_redraws() {
        let (mut engine, label) = label_engine("hello");
        engine.step().unwrap();
        engine.channel_mut().take_output();
        engine.channel_mut().resize(8, 2);
        assert_eq!(engine.step().unwrap(), Outcome::Consumed);
        assert_eq!(engine.root_canvas().width(), 8);
        assert_eq!(engine.tree().canvas(label).width(), 8);
        let out = engine.channel_mut().take_output();
        assert_eq!(screen_row(&out, 8, 2, 0), "hello");
    }

    #[test]
    fn test_resize_handled_before_queued_keys() {
        let (mut engine, _) = label_engine("x");
        engine.push_event(Event::Key(Key::char('a')));
        engine.inject_resize(30, 5);
        assert_eq!(engine.step().unwrap(), Outcome::Consumed);
        assert_eq!(engine.root_canvas().width(), 30);
        assert_eq!(
            engine.step().unwrap(),
            Outcome::Ignored(Event::Key(Key::char('a')))
        );
    }

    #[test]
    fn test_termination_quits() {
        let (mut engine, _) = label_engine("x");
        engine.channel_mut().terminate();
        assert_eq!(engine.step().unwrap(), Outcome::Quit);
        assert_eq!(engine.frame_count(), 0);
    }

    #[test]
    fn test_closed_input_restores_terminal() {
        let (mut engine, _) = label_engine("x");
        engine.channel_mut().close_input();
        assert!(matches!(engine.step(), Err(Error::InputClosed)));
        assert!(engine.channel().is_restored());
    }

    #[test]
    fn test_run_until_action_breaks() {
        let (mut engine, _) = label_engine("x");
        engine.bind("ctrl s", Act::Save).unwrap();
        engine.channel_mut().push_input(b"ab".to_vec());
        engine.channel_mut().push_input(vec![0x13]);
        let mut seen = Vec::new();
        engine
            .run(|_, action| {
                seen.push(action);
                ControlFlow::Break(())
            })
            .unwrap();
        assert_eq!(seen, vec![Act::Save]);
        assert!(!engine.is_running());
        assert!(engine.channel().is_restored());
    }

    #[test]
    fn test_run_ends_on_quit_key() {
        let (mut engine, _) = label_engine("x");
        engine.channel_mut().push_input(vec![0x03]);
        engine.run(|_, _| ControlFlow::Continue(())).unwrap();
        assert!(engine.channel().is_restored());
    }
}
