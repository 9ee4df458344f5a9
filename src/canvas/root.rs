//! Root canvas: owns the pending and committed grids.

use super::view::Canvas;
use crate::buffer::diff::{render_diff, render_full, DiffResult, DiffState};
use crate::buffer::Buffer;
use crate::terminal::Capabilities;

/// The screen-sized double buffer.
///
/// Widgets paint into `pending` through [`Canvas`] views. [`commit`]
/// diffs `pending` against `committed`, appends the writes to the output
/// and makes `pending` the new baseline. The next `pending` starts as a
/// copy of that baseline, so committing twice without painting emits
/// nothing the second time.
///
/// [`commit`]: RootCanvas::commit
pub struct RootCanvas {
    pending: Buffer,
    committed: Buffer,
    caps: Capabilities,
    state: DiffState,
    needs_clear: bool,
}

impl RootCanvas {
    /// Create a root canvas. The first commit clears the screen.
    pub fn new(width: u16, height: u16, caps: Capabilities) -> Self {
        Self {
            pending: Buffer::new(width, height),
            committed: Buffer::new(width, height),
            caps,
            state: DiffState::new(),
            needs_clear: true,
        }
    }

    /// Screen width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.pending.width()
    }

    /// Screen height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.pending.height()
    }

    /// View covering the whole screen.
    #[inline]
    pub const fn canvas(&self) -> Canvas {
        Canvas::root(self.pending.width(), self.pending.height())
    }

    /// The grid being painted.
    #[inline]
    pub fn pending(&self) -> &Buffer {
        &self.pending
    }

    /// Mutable access to the grid being painted.
    #[inline]
    pub fn pending_mut(&mut self) -> &mut Buffer {
        &mut self.pending
    }

    /// What the terminal is believed to show.
    #[inline]
    pub fn committed(&self) -> &Buffer {
        &self.committed
    }

    /// The capability table used for output.
    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Blank the pending grid before a full repaint.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Force a clear and full redraw on the next commit.
    pub fn invalidate(&mut self) {
        self.needs_clear = true;
    }

    /// Reallocate both grids at new dimensions and force a full redraw.
    ///
    /// Diffing against a grid of the old size is meaningless, so both
    /// grids start blank and the terminal state is forgotten.
    pub fn resize(&mut self, width: u16, height: u16) {
        tracing::debug!(width, height, "root canvas resized");
        self.pending.reset(width, height);
        self.committed.reset(width, height);
        self.state.reset();
        self.needs_clear = true;
    }

    /// Append the writes for everything painted since the last commit.
    pub fn commit(&mut self, output: &mut Vec<u8>) -> DiffResult {
        let result = if self.needs_clear {
            self.needs_clear = false;
            render_full(&self.pending, &self.caps, output, &mut self.state)
        } else {
            render_diff(&self.committed, &self.pending, &self.caps, output, &mut self.state)
        };
        self.committed.swap(&mut self.pending);
        self.pending.copy_from(&self.committed);
        tracing::trace!(
            cells = result.cells_changed,
            moves = result.cursor_moves,
            "frame committed"
        );
        result
    }
}

impl std::fmt::Debug for RootCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootCanvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("caps", &self.caps)
            .field("needs_clear", &self.needs_clear)
            .finish_non_exhaustive()
    }
}
