//! Key specs: the `"[modifier ...] name"` mini-language.
//!
//! [`canonicalize`] is the single normalisation point. The decoder's
//! sequence table runs every control byte through it, and spec parsing
//! runs every parsed key through it, so decoded keys and bound keys
//! compare equal with plain `==`.

use super::event::{Key, KeyCode, Modifiers, NAMED_KEYS};
use crate::error::KeySpecError;
use std::str::FromStr;

/// Irregular names terminals and users reach for.
const ALIASES: &[(&str, &str)] = &[
    ("escape", "esc"),
    ("return", "enter"),
    ("bksp", "backspace"),
    ("ins", "insert"),
    ("del", "delete"),
    ("pgup", "pageup"),
    ("pgdn", "pagedown"),
    ("page_up", "pageup"),
    ("page_down", "pagedown"),
];

/// Fold a key into its canonical representation.
///
/// Control combinations that a terminal cannot tell apart from another
/// key collapse onto that key (Ctrl+I is Tab, Ctrl+M is Enter, Ctrl+[ is
/// Esc, Ctrl+H is Backspace). Shift on a letter is the uppercase letter
/// without Shift, and Ctrl+Shift on a letter is plain Ctrl. Other
/// modifier bits are preserved.
pub fn canonicalize(key: Key) -> Key {
    let Key { code, modifiers } = key;
    let (code, modifiers) = match code {
        KeyCode::Char(c) if c.is_ascii_alphabetic() && modifiers.contains(Modifiers::CTRL) => {
            (KeyCode::Char(c.to_ascii_lowercase()), modifiers - Modifiers::SHIFT)
        }
        KeyCode::Char(c) if c.is_ascii_alphabetic() && modifiers.contains(Modifiers::SHIFT) => {
            (KeyCode::Char(c.to_ascii_uppercase()), modifiers - Modifiers::SHIFT)
        }
        other => (other, modifiers),
    };
    if !modifiers.contains(Modifiers::CTRL) {
        return Key::new(code, modifiers);
    }
    let rest = modifiers - Modifiers::CTRL;

    match code {
        KeyCode::Char('i') => Key::new(KeyCode::Tab, rest),
        KeyCode::Char('m') => Key::new(KeyCode::Enter, rest),
        KeyCode::Char('[') => Key::new(KeyCode::Esc, rest),
        KeyCode::Char('h' | '8') => Key::new(KeyCode::Backspace, rest),
        KeyCode::Char('`' | '~' | '2' | '-') => Key::new(KeyCode::Char(' '), modifiers),
        KeyCode::Char('4') => Key::new(KeyCode::Char('|'), modifiers),
        KeyCode::Char('5') => Key::new(KeyCode::Char(']'), modifiers),
        KeyCode::Char('7') => Key::new(KeyCode::Char('?'), modifiers),
        KeyCode::Enter => Key::new(KeyCode::Char('j'), modifiers),
        other => Key::new(other, modifiers),
    }
}

fn modifier_named(word: &str) -> Result<Modifiers, KeySpecError> {
    match word.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Ok(Modifiers::CTRL),
        "alt" | "meta" => Ok(Modifiers::ALT),
        "shift" => Ok(Modifiers::SHIFT),
        _ => Err(KeySpecError::UnknownModifier(word.to_string())),
    }
}

fn code_named(name: &str) -> Result<KeyCode, KeySpecError> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = name.to_ascii_lowercase();
    if lower == "space" {
        return Ok(KeyCode::Char(' '));
    }
    let lower = ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map_or(lower.as_str(), |(_, canonical)| canonical);

    if let Some((_, code)) = NAMED_KEYS.iter().find(|(n, _)| *n == lower) {
        return Ok(*code);
    }
    if let Some(n) = lower.strip_prefix('f').and_then(|d| d.parse::<u8>().ok()) {
        if (1..=20).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }
    Err(KeySpecError::UnknownKey(name.to_string()))
}

/// Parse and canonicalise a key spec such as `"ctrl c"` or `"shift tab"`.
///
/// The name is everything after the last space, so `"alt  "` style
/// specs are not supported; write `"alt space"` instead.
pub fn parse(spec: &str) -> Result<Key, KeySpecError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(KeySpecError::Empty);
    }
    let (mods, name) = match spec.rfind(' ') {
        Some(i) => (&spec[..i], spec[i + 1..].trim()),
        None => ("", spec),
    };

    let mut modifiers = Modifiers::empty();
    for word in mods.split_whitespace() {
        modifiers |= modifier_named(word)?;
    }
    let code = code_named(name)?;
    Ok(canonicalize(Key::new(code, modifiers)))
}

impl FromStr for Key {
    type Err = KeySpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl Key {
    /// Whether this key is the one described by `spec`.
    ///
    /// An unparseable spec matches nothing.
    pub fn matches(&self, spec: &str) -> bool {
        parse(spec).is_ok_and(|k| k == *self)
    }
}
