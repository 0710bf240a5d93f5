// SPDX-License-Identifier: MIT
//
// FrameBuffer: the grid of cells a view paints into.
//
// Cells live in a flat row-major `Vec<Cell>`, so one terminal row is a
// contiguous slice and the output stage walks it left to right.
//
// Views receive a `Rect` (their area) and clip every write to it. Writes
// outside the frame are dropped silently, so layout code can compute
// positions freely and let the buffer discard what does not fit.

use unicode_width::UnicodeWidthChar;

use crate::cell::{Cell, Style};
use crate::color::CellColor;

// ─── Rect ────────────────────────────────────────────────────────────────────

/// An axis-aligned area of the frame, in cells.
///
/// ```
/// use chromath_term::buffer::Rect;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let (caption, body) = area.split_top(1);
/// assert_eq!(caption.height, 1);
/// assert_eq!(body, Rect::new(0, 1, 80, 23));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the rightmost column.
    #[inline]
    #[must_use]
    pub const fn right(self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// One past the bottom row.
    #[inline]
    #[must_use]
    pub const fn bottom(self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two rects, `None` if they do not overlap.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right > x && bottom > y).then(|| Self::new(x, y, right - x, bottom - y))
    }

    /// Split off the top `rows` rows: `(top, rest)`.
    #[must_use]
    pub const fn split_top(self, rows: u16) -> (Self, Self) {
        let rows = if rows < self.height { rows } else { self.height };
        (
            Self::new(self.x, self.y, self.width, rows),
            Self::new(self.x, self.y + rows, self.width, self.height - rows),
        )
    }

    /// Split off the bottom `rows` rows: `(rest, bottom)`.
    #[must_use]
    pub const fn split_bottom(self, rows: u16) -> (Self, Self) {
        let rows = if rows < self.height { rows } else { self.height };
        let rest = self.height - rows;
        (
            Self::new(self.x, self.y, self.width, rest),
            Self::new(self.x, self.y + rest, self.width, rows),
        )
    }
}

// ─── FrameBuffer ─────────────────────────────────────────────────────────────

/// A `width × height` grid of cells.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// A blank frame.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, CellColor::Default)
    }

    /// A frame of spaces on background `bg`.
    #[must_use]
    pub fn filled(width: u16, height: u16, bg: CellColor) -> Self {
        let cell = Cell { bg, ..Cell::EMPTY };
        Self {
            width,
            height,
            cells: vec![cell; usize::from(width) * usize::from(height)],
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The whole frame as a rect at the origin.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    const fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.area().contains(x, y).then(|| &self.cells[self.index(x, y)])
    }

    /// Cells of row `y`.
    #[must_use]
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y < self.height {
            let start = self.index(0, y);
            Some(&self.cells[start..start + usize::from(self.width)])
        } else {
            None
        }
    }

    /// Write a cell. Returns `false` outside the frame or `clip`.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell, clip: Option<Rect>) -> bool {
        if !self.area().contains(x, y) || clip.is_some_and(|c| !c.contains(x, y)) {
            return false;
        }
        self.orphan_wide_neighbors(x, y);
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    /// Paint one character in `style`, clipped to `clip`.
    #[inline]
    pub fn paint(&mut self, x: u16, y: u16, ch: char, style: Style, clip: Option<Rect>) -> bool {
        self.set(x, y, Cell::new(ch, style), clip)
    }

    /// Fill `rect` (clipped to the frame) with spaces on `bg`.
    pub fn fill_rect(&mut self, rect: Rect, bg: CellColor) {
        let Some(r) = rect.intersect(self.area()) else {
            return;
        };
        let blank = Cell { bg, ..Cell::EMPTY };
        for y in r.y..r.bottom() {
            let start = self.index(r.x, y);
            let end = self.index(r.right(), y);
            self.cells[start..end].fill(blank);
        }
    }

    /// Paint `text` left to right from `(x, y)`, clipped to `clip`.
    ///
    /// Zero-width characters are skipped. A wide character that would be
    /// cut by the right edge is replaced with a space. Returns the number
    /// of columns advanced.
    pub fn paint_text(&mut self, x: u16, y: u16, text: &str, style: Style, clip: Option<Rect>) -> u16 {
        let limit = clip.map_or(self.width, |c| c.right().min(self.width));
        let mut col = x;
        for ch in text.chars() {
            if col >= limit {
                break;
            }
            match ch.width().unwrap_or(0) {
                0 => {}
                1 => {
                    self.paint(col, y, ch, style, clip);
                    col += 1;
                }
                _ if col + 1 >= limit => {
                    self.paint(col, y, ' ', style, clip);
                    col += 1;
                    break;
                }
                _ => {
                    if self.paint(col, y, ch, style, clip) {
                        self.set(col + 1, y, Cell::continuation(style), clip);
                    }
                    col += 2;
                }
            }
        }
        col - x
    }

    /// Break any wide character that `(x, y)` is about to overwrite half of.
    fn orphan_wide_neighbors(&mut self, x: u16, y: u16) {
        let idx = self.index(x, y);
        if self.cells[idx].is_continuation() && x > 0 {
            self.cells[idx - 1].ch = ' ';
        }
        if x + 1 < self.width && self.cells[idx + 1].is_continuation() {
            self.cells[idx + 1] = Cell {
                ch: ' ',
                ..self.cells[idx + 1]
            };
        }
    }

    /// The characters of the frame, one line per row, trailing spaces
    /// trimmed. Colors are dropped.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for y in 0..self.height {
            let line: String = self
                .row(y)
                .unwrap_or_default()
                .iter()
                .filter(|c| !c.is_continuation())
                .map(|c| c.ch)
                .collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FrameBuffer({}x{})", self.width, self.height)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
