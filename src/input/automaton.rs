//! Automaton: byte trie over the sequence table, plus the streaming decoder.
//!
//! # Architecture
//!
//! ```text
//!   bytes ──▶ Decoder ──▶ Vec<Event>
//!               │
//!               │ walks (read-only, shared)
//!               ▼
//!   ┌──────────────────────────────┐
//!   │ Automaton                    │
//!   │  nodes[0] = root             │
//!   │  node: sorted (byte, Step)   │
//!   │  Step::Node(i) | Step::Leaf  │
//!   └──────────────────────────────┘
//! ```
//!
//! The automaton is built once and never mutated. All match progress
//! lives in the [`Decoder`], which is cheap to create per session.

use super::event::{Event, Key, KeyCode, Modifiers, MouseEvent};
use super::table::{self, Action, Sequence};
use crate::error::{Error, Result};
use std::sync::Arc;

const ESC: u8 = 0x1b;

/// Where one byte leads from a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// An inner node that may itself terminate a sequence.
    Node(usize),
    /// A terminal with no continuation.
    Leaf(Action),
}

#[derive(Debug, Default, Clone)]
struct Node {
    /// Action if the path to this node is a complete sequence.
    terminal: Option<Action>,
    /// Outgoing edges, sorted by byte.
    edges: Vec<(u8, Step)>,
}

impl Node {
    fn step(&self, byte: u8) -> Option<Step> {
        self.edges
            .binary_search_by_key(&byte, |(b, _)| *b)
            .ok()
            .map(|i| self.edges[i].1)
    }
}

/// Immutable byte-sequence matcher.
#[derive(Debug, Clone)]
pub struct Automaton {
    nodes: Vec<Node>,
}

impl Automaton {
    /// Build from a sequence table.
    ///
    /// Fails if two entries share the same byte sequence.
    pub fn build(sequences: &[Sequence]) -> Result<Self> {
        let mut nodes = vec![Node::default()];

        for (bytes, action) in sequences {
            let mut at = 0;
            for &byte in bytes {
                at = match nodes[at].step(byte) {
                    Some(Step::Node(next)) => next,
                    _ => {
                        let next = nodes.len();
                        nodes.push(Node::default());
                        let edges = &mut nodes[at].edges;
                        let pos = edges.partition_point(|(b, _)| *b < byte);
                        edges.insert(pos, (byte, Step::Node(next)));
                        next
                    }
                };
            }
            if nodes[at].terminal.is_some() {
                return Err(Error::DuplicateSequence {
                    sequence: bytes.clone(),
                });
            }
            nodes[at].terminal = Some(*action);
        }

        let mut automaton = Self { nodes };
        automaton.minimize();
        Ok(automaton)
    }

    /// The standard xterm-compatible automaton.
    pub fn standard() -> Result<Self> {
        Self::build(&table::standard())
    }

    /// Collapse edges into childless terminal nodes directly into leaves.
    ///
    /// Collapsed nodes stay in the arena but become unreachable.
    fn minimize(&mut self) {
        let mut collapsed = 0usize;
        for i in 0..self.nodes.len() {
            for e in 0..self.nodes[i].edges.len() {
                if let (byte, Step::Node(child)) = self.nodes[i].edges[e] {
                    let target = &self.nodes[child];
                    if let (Some(action), true) = (target.terminal, target.edges.is_empty()) {
                        self.nodes[i].edges[e] = (byte, Step::Leaf(action));
                        collapsed += 1;
                    }
                }
            }
        }
        tracing::trace!(nodes = self.nodes.len(), collapsed, "automaton minimized");
    }

    #[inline]
    fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }
}

/// Decoder progress between bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Walking the trie; `node` is the current partial path.
    Trie { node: usize },
    /// Collecting a UTF-8 scalar.
    Utf8 { need: usize, alt: bool },
    /// Collecting the three bytes of a mouse report; the payload starts
    /// at `buffered[start]`.
    Mouse { start: usize },
}

const ROOT: Mode = Mode::Trie { node: 0 };

/// Streaming decoder over a shared [`Automaton`].
///
/// `feed` is pure in the sense that matters for terminals: splitting the
/// input into arbitrary chunks yields exactly the same events as feeding
/// it in one call. A partial sequence is held until more bytes arrive or
/// until [`Decoder::flush`] is called.
#[derive(Debug, Clone)]
pub struct Decoder {
    automaton: Arc<Automaton>,
    mode: Mode,
    buffered: Vec<u8>,
}

impl Decoder {
    /// Create a decoder at the root state.
    pub fn new(automaton: Arc<Automaton>) -> Self {
        Self {
            automaton,
            mode: ROOT,
            buffered: Vec::with_capacity(16),
        }
    }

    /// Whether a partial sequence is waiting for more bytes.
    pub fn is_pending(&self) -> bool {
        !self.buffered.is_empty()
    }

    /// Decode a chunk of bytes, returning every event it completes.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Event> {
        let mut out = Vec::new();
        for &byte in bytes {
            self.push(byte, &mut out);
        }
        out
    }

    /// Resolve a pending trie path as if no more bytes will follow.
    ///
    /// A path that is itself a complete sequence (a lone `ESC`) emits
    /// that key; otherwise the usual degrade rules apply. Fixed-length
    /// mouse and UTF-8 payloads are left pending.
    pub fn flush(&mut self) -> Option<Event> {
        let Mode::Trie { node } = self.mode else {
            return None;
        };
        if self.buffered.is_empty() {
            return None;
        }
        let event = match self.automaton.node(node).terminal {
            Some(Action::Key(key)) => Some(Event::Key(key)),
            Some(Action::Mouse) | None => Some(Event::Key(self.degrade())),
        };
        self.reset();
        event
    }

    fn reset(&mut self) {
        self.mode = ROOT;
        self.buffered.clear();
    }

    fn push(&mut self, byte: u8, out: &mut Vec<Event>) {
        match self.mode {
            Mode::Trie { node } => self.push_trie(node, byte, out),
            Mode::Utf8 { need, alt } => self.push_utf8(need, alt, byte, out),
            Mode::Mouse { start } => {
                self.buffered.push(byte);
                if let [b0, b1, b2] = self.buffered[start..] {
                    out.push(Event::Mouse(MouseEvent::from_x10(b0, b1, b2)));
                    self.reset();
                }
            }
        }
    }

    fn push_trie(&mut self, node: usize, byte: u8, out: &mut Vec<Event>) {
        self.buffered.push(byte);
        match self.automaton.node(node).step(byte) {
            Some(Step::Node(next)) => self.mode = Mode::Trie { node: next },
            Some(Step::Leaf(Action::Key(key))) => {
                out.push(Event::Key(key));
                self.reset();
            }
            Some(Step::Leaf(Action::Mouse)) => {
                self.mode = Mode::Mouse {
                    start: self.buffered.len(),
                };
            }
            None => self.no_continuation(byte, out),
        }
    }

    fn no_continuation(&mut self, byte: u8, out: &mut Vec<Event>) {
        let alt = match self.buffered[..] {
            [_] => false,
            [ESC, _] => true,
            _ => {
                tracing::trace!(bytes = ?self.buffered, "unresolved input sequence");
                out.push(Event::Key(Key::INVALID));
                self.reset();
                return;
            }
        };
        let need = match byte {
            0xc0..=0xdf => 1,
            0xe0..=0xef => 2,
            0xf0..=0xf7 => 3,
            0x00..=0x7f => 0,
            _ => {
                out.push(Event::Key(Key::INVALID));
                self.reset();
                return;
            }
        };
        if need == 0 {
            out.push(Event::Key(Self::char_key(char::from(byte), alt)));
            self.reset();
        } else {
            self.buffered.clear();
            self.buffered.push(byte);
            self.mode = Mode::Utf8 { need, alt };
        }
    }

    fn push_utf8(&mut self, need: usize, alt: bool, byte: u8, out: &mut Vec<Event>) {
        if byte & 0xc0 != 0x80 {
            // Malformed: report it, then start over with this byte.
            out.push(Event::Key(Key::INVALID));
            self.reset();
            self.push(byte, out);
            return;
        }
        self.buffered.push(byte);
        if need > 1 {
            self.mode = Mode::Utf8 { need: need - 1, alt };
            return;
        }
        let key = std::str::from_utf8(&self.buffered)
            .ok()
            .and_then(|s| s.chars().next())
            .map_or(Key::INVALID, |c| Self::char_key(c, alt));
        out.push(Event::Key(key));
        self.reset();
    }

    fn char_key(c: char, alt: bool) -> Key {
        let modifiers = if alt { Modifiers::ALT } else { Modifiers::empty() };
        Key::new(KeyCode::Char(c), modifiers)
    }

    /// Degraded key for the current buffer when no continuation comes.
    fn degrade(&self) -> Key {
        match self.buffered[..] {
            [b] if b.is_ascii() => Self::char_key(char::from(b), false),
            [ESC, b] if b.is_ascii() => Self::char_key(char::from(b), true),
            _ => Key::INVALID,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::event::MouseButton;
    use proptest::prelude::*;

    fn decoder() -> Decoder {
        Decoder::new(Arc::new(Automaton::standard().unwrap()))
    }

    fn keys(events: &[Event]) -> Vec<Key> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::Key(k) => Some(*k),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_arrow_up() {
        let mut d = decoder();
        assert_eq!(d.feed(b"\x1b[A"), vec![Event::Key(Key::plain(KeyCode::Up))]);
        assert!(!d.is_pending());
    }

    #[test]
    fn test_mouse_report() {
        let mut d = decoder();
        let events = d.feed(&[0x1b, b'[', b'M', 0x20, 0x21, 0x21]);
        assert_eq!(events.len(), 1);
        let Event::Mouse(m) = events[0] else {
            panic!("expected mouse event, got {events:?}");
        };
        assert_eq!((m.x, m.y), (0, 0));
        assert_eq!(m.button, MouseButton::Left);
        assert!(m.modifiers.is_empty());
    }

    #[test]
    fn test_plain_and_control() {
        let mut d = decoder();
        let events = d.feed(b"a\x03\x09\x7f");
        assert_eq!(
            keys(&events),
            vec![
                Key::char('a'),
                Key::ctrl('c'),
                Key::plain(KeyCode::Tab),
                Key::plain(KeyCode::Backspace),
            ]
        );
    }

    #[test]
    fn test_alt_char() {
        let mut d = decoder();
        assert_eq!(
            keys(&d.feed(b"\x1bx")),
            vec![Key::new(KeyCode::Char('x'), Modifiers::ALT)]
        );
    }

    #[test]
    fn test_unresolved_sequence_is_invalid() {
        let mut d = decoder();
        // ESC [ is a prefix, 'q' does not continue it
        let events = d.feed(b"\x1b[qz");
        assert_eq!(keys(&events), vec![Key::INVALID, Key::char('z')]);
    }

    #[test]
    fn test_lone_escape_waits_for_flush() {
        let mut d = decoder();
        assert!(d.feed(b"\x1b").is_empty());
        assert!(d.is_pending());
        assert_eq!(d.flush(), Some(Event::Key(Key::plain(KeyCode::Esc))));
        assert!(!d.is_pending());
        assert_eq!(d.flush(), None);
    }

    #[test]
    fn test_flush_degrades_partial_prefix() {
        let mut d = decoder();
        d.feed(b"\x1bO");
        assert_eq!(
            d.flush(),
            Some(Event::Key(Key::new(KeyCode::Char('O'), Modifiers::ALT)))
        );
        d.feed(b"\x1b[1;");
        assert_eq!(d.flush(), Some(Event::Key(Key::INVALID)));
    }

    #[test]
    fn test_flush_keeps_mouse_payload() {
        let mut d = decoder();
        d.feed(b"\x1b[M\x20");
        assert_eq!(d.flush(), None);
        assert_eq!(d.feed(b"\x21\x21").len(), 1);
    }

    #[test]
    fn test_utf8() {
        let mut d = decoder();
        assert_eq!(keys(&d.feed("é→".as_bytes())), vec![Key::char('é'), Key::char('→')]);
        assert_eq!(
            keys(&d.feed("\x1bé".as_bytes())),
            vec![Key::new(KeyCode::Char('é'), Modifiers::ALT)]
        );
    }

    #[test]
    fn test_malformed_utf8_keeps_following_byte() {
        let mut d = decoder();
        assert_eq!(keys(&d.feed(&[0xc3, b'a'])), vec![Key::INVALID, Key::char('a')]);
        assert_eq!(keys(&d.feed(&[0x80])), vec![Key::INVALID]);
    }

    #[test]
    fn test_duplicate_sequence_rejected() {
        let dup = vec![
            (b"\x1b[A".to_vec(), Action::Key(Key::plain(KeyCode::Up))),
            (b"\x1b[A".to_vec(), Action::Key(Key::plain(KeyCode::Down))),
        ];
        assert!(matches!(
            Automaton::build(&dup),
            Err(Error::DuplicateSequence { .. })
        ));
    }

    #[test]
    fn test_minimized_leaf_resets() {
        let mut d = decoder();
        // F5 with ctrl, then a plain key straight after
        let events = d.feed(b"\x1b[15;5~k");
        assert_eq!(
            keys(&events),
            vec![Key::new(KeyCode::F(5), Modifiers::CTRL), Key::char('k')]
        );
    }

    #[test]
    fn test_decoded_matches_key_names() {
        let mut d = decoder();
        let cases: [(&[u8], &str); 6] = [
            (b"\x09", "ctrl i"),
            (b"\x0d", "ctrl m"),
            (b"\x1b[1;5D", "ctrl left"),
            (b"\x1b[Z", "shift tab"),
            (b"\x1b\x03", "ctrl alt c"),
            (b"\x1b[6~", "pagedown"),
        ];
        for (bytes, spec) in cases {
            let events = d.feed(bytes);
            let key: Key = spec.parse().unwrap();
            assert_eq!(events, vec![Event::Key(key)], "{spec}");
        }
    }

    #[test]
    fn test_shifted_letters_match_key_names() {
        let mut d = decoder();
        let cases: [(&[u8], &str); 3] = [(b"A", "shift a"), (b"\x1bA", "alt shift a"), (b"a", "a")];
        for (bytes, spec) in cases {
            let key: Key = spec.parse().unwrap();
            assert_eq!(d.feed(bytes), vec![Event::Key(key)], "{spec}");
            assert!(key.matches(spec));
        }
    }

    /// Bytes a terminal sends for a letter, optionally shifted, optionally
    /// ESC-prefixed for alt.
    fn letter_bytes(letter: u8, shift: bool, alt: bool) -> Vec<u8> {
        let byte = if shift { letter.to_ascii_uppercase() } else { letter };
        if alt {
            vec![ESC, byte]
        } else {
            vec![byte]
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_incremental_equals_batch(
            bytes in proptest::collection::vec(
                prop_oneof![
                    Just(0x1bu8), Just(b'['), Just(b'O'), Just(b'M'), Just(b'1'),
                    Just(b';'), Just(b'5'), Just(b'~'), Just(b'A'), Just(0xc3),
                    Just(0xa9), any::<u8>(),
                ],
                0..64,
            ),
            split in 0usize..64,
        ) {
            let mut batch = decoder();
            let expected = batch.feed(&bytes);

            let mut single = decoder();
            let mut got = Vec::new();
            for b in &bytes {
                got.extend(single.feed(std::slice::from_ref(b)));
            }
            prop_assert_eq!(&got, &expected);

            let cut = split.min(bytes.len());
            let mut halves = decoder();
            let mut got = halves.feed(&bytes[..cut]);
            got.extend(halves.feed(&bytes[cut..]));
            prop_assert_eq!(&got, &expected);
        }

        #[test]
        fn prop_letters_decode_to_parsed_key(
            letter in b'a'..=b'z',
            shift in any::<bool>(),
            alt in any::<bool>(),
        ) {
            let spec = format!(
                "{}{}{}",
                if alt { "alt " } else { "" },
                if shift { "shift " } else { "" },
                char::from(letter),
            );
            let mut d = decoder();
            let mut events = d.feed(&letter_bytes(letter, shift, alt));
            // ESC O is also an SS3 prefix and waits for a flush
            events.extend(d.flush());
            let parsed: Key = spec.parse().unwrap();
            prop_assert_eq!(events, vec![Event::Key(parsed)]);
        }
    }
}
