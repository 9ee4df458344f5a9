//! Diffing Engine: emit terminal writes for cells that changed.
//!
//! This module implements the core anti-flicker logic:
//! 1. Compare the committed and pending buffers row-major
//! 2. Emit a positioned write only for cells that differ
//! 3. Skip the cursor move when the next changed cell is adjacent
//! 4. Track the last emitted style; any change is reset + full reapply
//!
//! Terminal attribute strings can only be switched on, so a style change
//! always goes through `AttributeReset` followed by every attribute and
//! color of the new style. All output is accumulated in one buffer.

use super::{Buffer, Style};
use crate::terminal::{Capabilities, Capability};

/// State tracker for the diffing algorithm.
///
/// This tracks what the terminal currently has (cursor position, style)
/// so redundant moves and style switches can be skipped.
#[derive(Debug, Clone)]
pub struct DiffState {
    /// Last known cursor position, `None` if unknown.
    cursor: Option<(u16, u16)>,
    /// Last emitted style, `None` if unknown.
    style: Option<Style>,
}

impl Default for DiffState {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffState {
    /// Create a new diff state with unknown terminal state.
    pub const fn new() -> Self {
        Self {
            cursor: None,
            style: None,
        }
    }

    /// Forget everything (e.g., after a full screen clear).
    pub const fn reset(&mut self) {
        self.cursor = None;
        self.style = None;
    }
}

/// Result of a diff operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Number of cells that were different.
    pub cells_changed: usize,
    /// Number of cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Number of style reset-and-reapply sequences emitted.
    pub style_changes: usize,
}

/// Append the writes that turn `prev` into `next`.
///
/// Both buffers must have the same dimensions.
pub fn render_diff(
    prev: &Buffer,
    next: &Buffer,
    caps: &Capabilities,
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    debug_assert_eq!(prev.width(), next.width());
    debug_assert_eq!(prev.height(), next.height());

    let mut result = DiffResult::default();
    let width = next.width() as usize;
    if width == 0 {
        return result;
    }

    for (idx, (old, new)) in prev.cells().iter().zip(next.cells()).enumerate() {
        if old == new {
            continue;
        }
        result.cells_changed += 1;

        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = ((idx % width) as u16, (idx / width) as u16);

        if state.cursor != Some((x, y)) {
            caps.move_to(output, x, y);
            result.cursor_moves += 1;
        }

        if state.style != Some(new.style) {
            emit_style(caps, output, new.style);
            state.style = Some(new.style);
            result.style_changes += 1;
        }

        let mut utf8 = [0u8; 4];
        output.extend_from_slice(new.ch.encode_utf8(&mut utf8).as_bytes());

        // Cells are single-width; past the last column the position is unknown
        state.cursor = if x + 1 < next.width() {
            Some((x + 1, y))
        } else {
            None
        };
    }

    result
}

/// Reset attributes, then apply the whole of `style`.
fn emit_style(caps: &Capabilities, output: &mut Vec<u8>, style: Style) {
    caps.emit(output, Capability::AttributeReset);
    caps.set_attrs(output, style.attrs);
    if let Some(fg) = style.fg {
        caps.set_fg(output, fg);
    }
    if let Some(bg) = style.bg {
        caps.set_bg(output, bg);
    }
}

/// Append a full repaint of `buffer` (no diffing), clearing first.
///
/// Used for the first frame and after a resize, when the terminal
/// contents are unknown.
pub fn render_full(
    buffer: &Buffer,
    caps: &Capabilities,
    output: &mut Vec<u8>,
    state: &mut DiffState,
) -> DiffResult {
    caps.emit(output, Capability::AttributeReset);
    caps.emit(output, Capability::Clear);
    state.reset();
    state.style = Some(Style::PLAIN);
    // A cleared screen is a blank buffer; diff against one
    let blank = Buffer::new(buffer.width(), buffer.height());
    render_diff(&blank, buffer, caps, output, state)
}
