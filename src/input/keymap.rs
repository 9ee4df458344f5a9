//! Keymap: application key bindings keyed by canonical [`Key`].

use super::event::Key;
use super::keyspec;
use crate::error::Result;
use std::collections::HashMap;

/// Maps keys to application actions.
///
/// Bindings are stored under the canonical key, so `"ctrl i"` and `"tab"`
/// name the same binding.
#[derive(Debug, Clone)]
pub struct Keymap<A> {
    bindings: HashMap<Key, A>,
}

impl<A> Default for Keymap<A> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<A> Keymap<A> {
    /// Create an empty keymap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key spec to an action, replacing any previous binding.
    pub fn bind(&mut self, spec: &str, action: A) -> Result<Option<A>> {
        let key = keyspec::parse(spec)?;
        Ok(self.bindings.insert(key, action))
    }

    /// Bind an already-decoded key.
    pub fn bind_key(&mut self, key: Key, action: A) -> Option<A> {
        self.bindings.insert(keyspec::canonicalize(key), action)
    }

    /// Remove a binding.
    pub fn unbind(&mut self, spec: &str) -> Result<Option<A>> {
        let key = keyspec::parse(spec)?;
        Ok(self.bindings.remove(&key))
    }

    /// Action bound to `key`, if any.
    pub fn lookup(&self, key: &Key) -> Option<&A> {
        self.bindings.get(key)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
