//! Buffer: the character grid behind a root canvas.
//!
//! One `Buffer` holds a whole screen of single-width cells, row-major.
//! Canvases never own one; they borrow it per call and clip writes to
//! their own rectangle before anything reaches the grid.

use super::cell::Cell;

/// A `width` x `height` grid of cells.
///
/// Cell `(x, y)` lives at `y * width + x`. A zero-sized grid is valid and
/// holds nothing; every write to it is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Buffer {
    /// A blank grid.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![Cell::EMPTY; area(width, height)],
            width,
            height,
        }
    }

    /// Columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Cell count.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Flat index of `(x, y)`, or `None` off the grid.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// The cell at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).and_then(|i| self.cells.get(i))
    }

    /// Overwrite the cell at `(x, y)`. Off-grid writes are dropped and
    /// reported as `false`.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        match self.index_of(x, y).and_then(|i| self.cells.get_mut(i)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Paint `cell` over a rectangle, cut down to the grid.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, cell: Cell) {
        let right = usize::from(x.saturating_add(width).min(self.width));
        let bottom = y.saturating_add(height).min(self.height);
        let left = usize::from(x);
        if left >= right {
            return;
        }
        let stride = usize::from(self.width);
        for row in y..bottom {
            let base = usize::from(row) * stride;
            self.cells[base + left..base + right].fill(cell);
        }
    }

    /// Blank every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Change dimensions. The contents are discarded.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.cells.clear();
        self.cells.resize(area(width, height), Cell::EMPTY);
        self.width = width;
        self.height = height;
    }

    /// Take on `other`'s contents. Both grids must be the same size.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "copy between grids of different size"
        );
        self.cells.copy_from_slice(&other.cells);
    }

    /// Exchange grids without copying cells.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.width.max(1)))
    }

    /// Characters of row `y` as a string (for tests and debugging).
    pub fn row_text(&self, y: u16) -> String {
        self.rows()
            .nth(usize::from(y))
            .map(|row| row.iter().map(|c| c.ch).collect())
            .unwrap_or_default()
    }
}

#[inline]
fn area(width: u16, height: u16) -> usize {
    usize::from(width) * usize::from(height)
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
