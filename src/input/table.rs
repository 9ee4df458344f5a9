//! Standard escape-sequence table for xterm-compatible terminals.

use super::event::{Key, KeyCode, Modifiers};
use super::keyspec::canonicalize;

const ESC: u8 = 0x1b;

/// What a complete sequence resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit a fixed key.
    Key(Key),
    /// Start reading a three-byte X10 mouse report.
    Mouse,
}

/// One raw sequence and what it means.
pub type Sequence = (Vec<u8>, Action);

/// xterm modifier parameter (`ESC [ 1 ; m X`) to modifier set.
const XTERM_MODIFIERS: [(u8, Modifiers); 8] = [
    // xterm encodes the parameter as 1 + bitmask, so 1 is "no modifiers"
    (b'1', Modifiers::empty()),
    (b'2', Modifiers::SHIFT),
    (b'3', Modifiers::ALT),
    (b'4', Modifiers::ALT.union(Modifiers::SHIFT)),
    (b'5', Modifiers::CTRL),
    (b'6', Modifiers::CTRL.union(Modifiers::SHIFT)),
    (b'7', Modifiers::CTRL.union(Modifiers::ALT)),
    (b'8', Modifiers::CTRL.union(Modifiers::ALT).union(Modifiers::SHIFT)),
];

const ARROWS: [(u8, KeyCode); 4] = [
    (b'A', KeyCode::Up),
    (b'B', KeyCode::Down),
    (b'C', KeyCode::Right),
    (b'D', KeyCode::Left),
];

const TILDE_KEYS: [(&str, KeyCode); 28] = [
    ("1", KeyCode::Home),
    ("2", KeyCode::Insert),
    ("3", KeyCode::Delete),
    ("4", KeyCode::End),
    ("5", KeyCode::PageUp),
    ("6", KeyCode::PageDown),
    ("7", KeyCode::Home),
    ("8", KeyCode::End),
    ("11", KeyCode::F(1)),
    ("12", KeyCode::F(2)),
    ("13", KeyCode::F(3)),
    ("14", KeyCode::F(4)),
    ("15", KeyCode::F(5)),
    ("17", KeyCode::F(6)),
    ("18", KeyCode::F(7)),
    ("19", KeyCode::F(8)),
    ("20", KeyCode::F(9)),
    ("21", KeyCode::F(10)),
    ("23", KeyCode::F(11)),
    ("24", KeyCode::F(12)),
    ("25", KeyCode::F(13)),
    ("26", KeyCode::F(14)),
    ("28", KeyCode::F(15)),
    ("29", KeyCode::F(16)),
    ("31", KeyCode::F(17)),
    ("32", KeyCode::F(18)),
    ("33", KeyCode::F(19)),
    ("34", KeyCode::F(20)),
];

/// The character a terminal sends a control byte for, with Ctrl held.
const fn control_char(byte: u8) -> char {
    match byte {
        0x00 => ' ',
        0x01..=0x1a => (b'a' + byte - 1) as char,
        0x1b => '[',
        0x1c => '|',
        0x1d => ']',
        0x1e => '6',
        _ => '?',
    }
}

fn key(code: KeyCode, modifiers: Modifiers) -> Action {
    Action::Key(Key::new(code, modifiers))
}

fn seq(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}

/// Build the standard table.
///
/// Control bytes go through [`canonicalize`], so `0x09` is Tab rather
/// than Ctrl+I and `ESC 0x09` is Alt+Tab.
pub fn standard() -> Vec<Sequence> {
    let mut table: Vec<Sequence> = Vec::with_capacity(600);

    for byte in 0x00..=0x1fu8 {
        let base = canonicalize(Key::ctrl(control_char(byte)));
        table.push((vec![byte], Action::Key(base)));
        if byte != ESC {
            let alt = canonicalize(Key::new(
                KeyCode::Char(control_char(byte)),
                Modifiers::CTRL | Modifiers::ALT,
            ));
            table.push((vec![ESC, byte], Action::Key(alt)));
        }
    }
    table.push((vec![ESC, ESC], key(KeyCode::Esc, Modifiers::ALT)));
    table.push((vec![0x7f], key(KeyCode::Backspace, Modifiers::empty())));
    table.push((vec![ESC, 0x7f], key(KeyCode::Backspace, Modifiers::ALT)));

    let none = Modifiers::empty();
    table.extend([
        (b"\x1b[Z".to_vec(), key(KeyCode::Tab, Modifiers::SHIFT)),
        (b"\x1b[E".to_vec(), key(KeyCode::Char('5'), none)),
        (b"\x1b[F".to_vec(), key(KeyCode::End, none)),
        (b"\x1b[G".to_vec(), key(KeyCode::Char('5'), none)),
        (b"\x1b[H".to_vec(), key(KeyCode::Home, none)),
        (b"\x1bOH".to_vec(), key(KeyCode::Home, none)),
        (b"\x1bOF".to_vec(), key(KeyCode::End, none)),
        (b"\x1bOo".to_vec(), key(KeyCode::Char('/'), none)),
        (b"\x1bOj".to_vec(), key(KeyCode::Char('*'), none)),
        (b"\x1bOm".to_vec(), key(KeyCode::Char('-'), none)),
        (b"\x1bOk".to_vec(), key(KeyCode::Char('+'), none)),
        (b"\x1bOM".to_vec(), key(KeyCode::Enter, none)),
        (b"\x1b[M".to_vec(), Action::Mouse),
    ]);

    for (code, name) in ARROWS {
        table.push((seq(&[b"\x1b[", &[code]]), key(name, none)));
        table.push((seq(&[b"\x1bO", &[code]]), key(name, none)));
        table.push((seq(&[b"\x1b[1;", &[code]]), key(name, none)));
        for (m, mods) in XTERM_MODIFIERS {
            table.push((seq(&[b"\x1b[1;", &[m, code]]), key(name, mods)));
        }
    }

    for (code, name) in TILDE_KEYS {
        let code = code.as_bytes();
        table.push((seq(&[b"\x1b[", code, b"~"]), key(name, none)));
        for (m, mods) in XTERM_MODIFIERS {
            table.push((seq(&[b"\x1b[", code, b";", &[m], b"~"]), key(name, mods)));
        }
    }

    for (code, n) in [(b'P', 1), (b'Q', 2), (b'R', 3), (b'S', 4)] {
        table.push((seq(&[b"\x1bO", &[code]]), key(KeyCode::F(n), none)));
        for (m, mods) in XTERM_MODIFIERS {
            table.push((seq(&[b"\x1bO", &[m, code]]), key(KeyCode::F(n), mods)));
            table.push((seq(&[b"\x1bO1;", &[m, code]]), key(KeyCode::F(n), mods)));
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn lookup(table: &[Sequence], bytes: &[u8]) -> Option<Action> {
        table.iter().find(|(s, _)| s == bytes).map(|(_, a)| *a)
    }

    #[test]
    fn test_no_duplicates() {
        let table = standard();
        let unique: HashSet<_> = table.iter().map(|(s, _)| s.clone()).collect();
        assert_eq!(unique.len(), table.len());
    }

    #[test]
    fn test_control_bytes_are_canonical() {
        let table = standard();
        assert_eq!(lookup(&table, b"\x09"), Some(key(KeyCode::Tab, Modifiers::empty())));
        assert_eq!(lookup(&table, b"\x0d"), Some(key(KeyCode::Enter, Modifiers::empty())));
        assert_eq!(lookup(&table, b"\x1b"), Some(key(KeyCode::Esc, Modifiers::empty())));
        assert_eq!(lookup(&table, b"\x03"), Some(Action::Key(Key::ctrl('c'))));
        assert_eq!(lookup(&table, b"\x1b\x09"), Some(key(KeyCode::Tab, Modifiers::ALT)));
        assert_eq!(
            lookup(&table, b"\x1b\x01"),
            Some(key(KeyCode::Char('a'), Modifiers::CTRL | Modifiers::ALT))
        );
    }

    #[test]
    fn test_modified_arrows() {
        let table = standard();
        assert_eq!(
            lookup(&table, b"\x1b[1;5C"),
            Some(key(KeyCode::Right, Modifiers::CTRL))
        );
        assert_eq!(lookup(&table, b"\x1b[1;1A"), Some(key(KeyCode::Up, Modifiers::empty())));
        assert_eq!(
            lookup(&table, b"\x1b[24;2~"),
            Some(key(KeyCode::F(12), Modifiers::SHIFT))
        );
    }
}
