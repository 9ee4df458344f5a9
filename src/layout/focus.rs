//! Focus: container-level selection among visible children.

/// Selection state of a container.
///
/// `selected` indexes the container's currently visible children.
/// `focused` says whether the selected child receives keys first; it
/// starts set so the first interactive child of a fresh tree is live.
/// Traversal never wraps: at either end it is a no-op that reports
/// `false`, letting the key bubble to the enclosing container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusState {
    selected: Option<usize>,
    focused: bool,
}

impl Default for FocusState {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusState {
    /// No selection, focus flag set.
    pub const fn new() -> Self {
        Self {
            selected: None,
            focused: true,
        }
    }

    /// Index of the selected child.
    #[inline]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether the selected child holds focus.
    #[inline]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// The selected child, if it currently holds focus.
    #[inline]
    pub const fn focused_child(&self) -> Option<usize> {
        if self.focused {
            self.selected
        } else {
            None
        }
    }

    /// Whether child `index` should render as focused, given the
    /// container's own focus.
    #[inline]
    pub const fn child_focused(&self, container_focused: bool, index: usize) -> bool {
        container_focused && self.focused && matches!(self.selected, Some(s) if s == index)
    }

    /// Move to the next interactive child after the selection.
    pub fn next(&mut self, interactive: &[bool]) -> bool {
        let start = self.selected.map_or(0, |s| s + 1);
        let found = interactive
            .iter()
            .enumerate()
            .skip(start)
            .find_map(|(i, &ok)| ok.then_some(i));
        self.land(found)
    }

    /// Move to the previous interactive child before the selection.
    pub fn prev(&mut self, interactive: &[bool]) -> bool {
        let end = self.selected.unwrap_or(interactive.len()).min(interactive.len());
        let found = interactive[..end].iter().rposition(|&ok| ok);
        self.land(found)
    }

    fn land(&mut self, found: Option<usize>) -> bool {
        match found {
            Some(i) => {
                self.selected = Some(i);
                self.focused = true;
                true
            }
            None => false,
        }
    }

    /// Drop focus, keeping the selection. `false` if already unfocused.
    pub fn escape(&mut self) -> bool {
        std::mem::replace(&mut self.focused, false)
    }

    /// Select child `index` and give it focus.
    pub fn select(&mut self, index: usize) {
        self.selected = Some(index);
        self.focused = true;
    }

    /// Re-validate after the visible set changed.
    ///
    /// A selection that still points at an interactive child is kept;
    /// otherwise it moves to the first interactive child, or clears.
    pub fn sync(&mut self, interactive: &[bool]) {
        let valid = self
            .selected
            .is_some_and(|s| interactive.get(s).copied().unwrap_or(false));
        if !valid {
            self.selected = interactive.iter().position(|&ok| ok);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_skips_non_interactive() {
        let mut focus = FocusState::new();
        let children = [false, true, false, true];
        focus.sync(&children);
        assert_eq!(focus.selected(), Some(1));
        assert!(focus.next(&children));
        assert_eq!(focus.selected(), Some(3));
    }

    #[test]
    fn test_no_wrap_is_noop() {
        let mut focus = FocusState::new();
        let children = [true, false, true];
        focus.sync(&children);
        assert!(!focus.prev(&children));
        assert_eq!(focus.selected(), Some(0));
        focus.select(2);
        assert!(!focus.next(&children));
        assert_eq!(focus.selected(), Some(2));
    }

    #[test]
    fn test_escape_keeps_selection() {
        let mut focus = FocusState::new();
        focus.select(1);
        assert!(focus.escape());
        assert!(!focus.escape());
        assert_eq!(focus.selected(), Some(1));
        assert_eq!(focus.focused_child(), None);
        assert!(focus.next(&[true, true, true]));
        assert!(focus.is_focused());
    }

    #[test]
    fn test_empty_children() {
        let mut focus = FocusState::new();
        focus.sync(&[]);
        assert_eq!(focus.selected(), None);
        assert!(!focus.next(&[]));
        assert!(!focus.prev(&[]));
    }

    #[test]
    fn test_sync_after_shrink() {
        let mut focus = FocusState::new();
        focus.select(4);
        focus.sync(&[false, true]);
        assert_eq!(focus.selected(), Some(1));
        focus.sync(&[false, true, true]);
        assert_eq!(focus.selected(), Some(1));
    }

    #[test]
    fn test_child_focused() {
        let mut focus = FocusState::new();
        focus.select(0);
        assert!(focus.child_focused(true, 0));
        assert!(!focus.child_focused(false, 0));
        assert!(!focus.child_focused(true, 1));
    }
}
