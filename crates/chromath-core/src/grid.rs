//! Dense 2D grid of single-digit values.
//!
//! A `Grid` is the shape every 2D dataset takes: the kernel grid produced by
//! the generator, and every grid the transformer returns. Cells are stored
//! row-major in a flat `Vec<u8>` (`index = row * cols + col`), so a row is a
//! contiguous slice.
//!
//! Rows are indexed by the x coordinate and columns by y. The grid keeps the
//! coordinate of its first row and column (`x_start`, `y_start`), so a cell
//! can be addressed either by index or by coordinate:
//!
//! ```text
//!            y_start      y_start + cols - 1
//!               │              │
//! x_start   ──▶ [0,0] [0,1] … [0,c-1]
//!               [1,0] [1,1] … [1,c-1]
//!                ⋮
//! x_start+r-1 ▶ [r-1,0] …     [r-1,c-1]
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// CoordRange
// ---------------------------------------------------------------------------

/// A half-open integer interval `start..end` along one grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordRange {
    pub start: i64,
    pub end: i64,
}

impl CoordRange {
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Number of coordinates in the interval (0 when `end <= start`).
    #[must_use]
    pub fn len(self) -> usize {
        usize::try_from(self.end.saturating_sub(self.start)).unwrap_or(0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    #[must_use]
    pub const fn contains(self, v: i64) -> bool {
        v >= self.start && v < self.end
    }

    /// Iterate the coordinates in ascending order.
    #[must_use]
    pub const fn iter(self) -> Range<i64> {
        self.start..self.end
    }
}

impl From<Range<i64>> for CoordRange {
    fn from(r: Range<i64>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl std::fmt::Display for CoordRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Sparse triples
// ---------------------------------------------------------------------------

/// A `(row, col, value)` triple, the sparse form of one grid cell.
pub type Triple = (usize, usize, u8);

/// A sparse triple addressed a cell outside the grid shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell ({row}, {col}) lies outside a {rows}x{cols} grid")]
pub struct OutOfShape {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A dense row-major grid of `u8` cells with a coordinate origin.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    x_start: i64,
    y_start: i64,
    cells: Vec<u8>,
}

impl Grid {
    // -- Construction -------------------------------------------------------

    /// A zero-filled grid with origin `(0, 0)`.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_origin(rows, cols, 0, 0)
    }

    /// A zero-filled grid whose first cell sits at coordinate `(x_start, y_start)`.
    #[must_use]
    pub fn with_origin(rows: usize, cols: usize, x_start: i64, y_start: i64) -> Self {
        Self {
            rows,
            cols,
            x_start,
            y_start,
            cells: vec![0; rows * cols],
        }
    }

    /// Build a grid by evaluating `f(row, col)` for every cell.
    #[must_use]
    pub fn from_fn(
        rows: usize,
        cols: usize,
        x_start: i64,
        y_start: i64,
        mut f: impl FnMut(usize, usize) -> u8,
    ) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(row, col));
            }
        }
        Self {
            rows,
            cols,
            x_start,
            y_start,
            cells,
        }
    }

    /// Rebuild a dense grid from sparse triples. Cells without a triple are 0.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfShape`] for the first triple outside `rows x cols`.
    pub fn from_triples(
        rows: usize,
        cols: usize,
        x_start: i64,
        y_start: i64,
        triples: impl IntoIterator<Item = Triple>,
    ) -> Result<Self, OutOfShape> {
        let mut grid = Self::with_origin(rows, cols, x_start, y_start);
        for (row, col, value) in triples {
            if !grid.set(row, col, value) {
                return Err(OutOfShape {
                    row,
                    col,
                    rows,
                    cols,
                });
            }
        }
        Ok(grid)
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    #[must_use]
    pub const fn x_start(&self) -> i64 {
        self.x_start
    }

    #[inline]
    #[must_use]
    pub const fn y_start(&self) -> i64 {
        self.y_start
    }

    /// The x coordinate range covered by the rows.
    #[must_use]
    pub fn x_range(&self) -> CoordRange {
        CoordRange::new(self.x_start, self.x_start + to_i64(self.rows))
    }

    /// The y coordinate range covered by the columns.
    #[must_use]
    pub fn y_range(&self) -> CoordRange {
        CoordRange::new(self.y_start, self.y_start + to_i64(self.cols))
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    const fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Cell at `(row, col)`, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.rows && col < self.cols {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Cell at coordinate `(x, y)`, or `None` outside the covered ranges.
    #[must_use]
    pub fn at(&self, x: i64, y: i64) -> Option<u8> {
        let row = usize::try_from(x.checked_sub(self.x_start)?).ok()?;
        let col = usize::try_from(y.checked_sub(self.y_start)?).ok()?;
        self.get(row, col)
    }

    /// Write a cell. Returns `false` if `(row, col)` is out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> bool {
        if row < self.rows && col < self.cols {
            let idx = self.index(row, col);
            self.cells[idx] = value;
            true
        } else {
            false
        }
    }

    /// A row as a slice, or `None` if `row` is out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row < self.rows {
            let start = self.index(row, 0);
            Some(&self.cells[start..start + self.cols])
        } else {
            None
        }
    }

    /// The raw row-major cell slice.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Iterate `(row, col, value)` over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Triple> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i / cols, i % cols, v))
    }

    /// Sparse form: every non-zero cell as a triple.
    ///
    /// [`from_triples`](Self::from_triples) restores zero for absent cells,
    /// so dropping zeros loses nothing.
    pub fn triples(&self) -> impl Iterator<Item = Triple> + '_ {
        self.iter().filter(|&(_, _, v)| v != 0)
    }

    /// A new grid of the same shape and origin with `f(row, col, value)`
    /// applied to every cell. The receiver is left untouched.
    #[must_use]
    pub fn map(&self, mut f: impl FnMut(usize, usize, u8) -> u8) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            x_start: self.x_start,
            y_start: self.y_start,
            cells: self.iter().map(|(r, c, v)| f(r, c, v)).collect(),
        }
    }

    /// Largest cell value (0 for an empty grid).
    #[must_use]
    pub fn max_value(&self) -> u8 {
        self.cells.iter().copied().max().unwrap_or(0)
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grid({}x{} @ {}, {})",
            self.rows, self.cols, self.x_start, self.y_start
        )
    }
}

#[allow(clippy::cast_possible_wrap)]
const fn to_i64(n: usize) -> i64 {
    // Grid dimensions are bounded far below i64::MAX by GridSpec validation.
    n as i64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── CoordRange ──────────────────────────────────────────────────────

    #[test]
    fn coord_range_len_and_contains() {
        let r = CoordRange::new(-50, 50);
        assert_eq!(r.len(), 100);
        assert!(r.contains(-50));
        assert!(r.contains(49));
        assert!(!r.contains(50));
        assert!(!r.is_empty());
    }

    #[test]
    fn coord_range_empty_when_reversed() {
        let r = CoordRange::new(5, 2);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }

    #[test]
    fn coord_range_display() {
        assert_eq!(CoordRange::new(-1, 2).to_string(), "-1..2");
    }

    // ── Construction ────────────────────────────────────────────────────

    #[test]
    fn new_is_zero_filled() {
        let g = Grid::new(3, 4);
        assert_eq!(g.shape(), (3, 4));
        assert!(g.cells().iter().all(|&v| v == 0));
    }

    #[test]
    fn from_fn_is_row_major() {
        let g = Grid::from_fn(2, 3, 0, 0, |r, c| u8::try_from(r * 10 + c).unwrap());
        assert_eq!(g.cells(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(g.row(1), Some(&[10, 11, 12][..]));
        assert_eq!(g.row(2), None);
    }

    // ── Addressing ──────────────────────────────────────────────────────

    #[test]
    fn coordinate_addressing_uses_origin() {
        let g = Grid::from_fn(3, 3, -1, -1, |r, c| u8::try_from(r * 3 + c).unwrap());
        assert_eq!(g.at(-1, -1), Some(0));
        assert_eq!(g.at(0, 0), Some(4));
        assert_eq!(g.at(1, 1), Some(8));
        assert_eq!(g.at(2, 0), None);
        assert_eq!(g.at(-2, 0), None);
        assert_eq!(g.x_range(), CoordRange::new(-1, 2));
    }

    #[test]
    fn set_out_of_bounds_is_rejected() {
        let mut g = Grid::new(2, 2);
        assert!(g.set(1, 1, 7));
        assert!(!g.set(2, 0, 7));
        assert_eq!(g.get(1, 1), Some(7));
    }

    // ── Sparse triples ──────────────────────────────────────────────────

    #[test]
    fn triples_skip_zero_cells() {
        let mut g = Grid::new(2, 2);
        g.set(0, 1, 3);
        g.set(1, 0, 9);
        let t: Vec<Triple> = g.triples().collect();
        assert_eq!(t, vec![(0, 1, 3), (1, 0, 9)]);
    }

    #[test]
    fn from_triples_defaults_missing_to_zero() {
        let g = Grid::from_triples(2, 3, -1, 0, vec![(1, 2, 5)]).unwrap();
        assert_eq!(g.cells(), &[0, 0, 0, 0, 0, 5]);
        assert_eq!(g.x_start(), -1);
    }

    #[test]
    fn from_triples_rejects_out_of_shape() {
        let err = Grid::from_triples(2, 2, 0, 0, vec![(0, 0, 1), (5, 0, 1)]).unwrap_err();
        assert_eq!(err.row, 5);
        assert!(err.to_string().contains("2x2"));
    }

    #[test]
    fn sparse_roundtrip_preserves_grid() {
        let g = Grid::from_fn(4, 5, -2, -2, |r, c| u8::try_from((r * c) % 4).unwrap());
        let back = Grid::from_triples(4, 5, -2, -2, g.triples()).unwrap();
        assert_eq!(back, g);
    }

    // ── map ─────────────────────────────────────────────────────────────

    #[test]
    fn map_keeps_shape_and_source() {
        let g = Grid::from_fn(2, 2, 3, 4, |_, _| 7);
        let doubled = g.map(|_, _, v| v * 2);
        assert_eq!(doubled.shape(), g.shape());
        assert_eq!(doubled.x_start(), 3);
        assert_eq!(doubled.cells(), &[14, 14, 14, 14]);
        assert_eq!(g.cells(), &[7, 7, 7, 7]);
    }

    #[test]
    fn max_value_of_empty_grid_is_zero() {
        assert_eq!(Grid::new(0, 0).max_value(), 0);
    }
}
