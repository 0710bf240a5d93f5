//! Pure geometry and counting behind the views.
//!
//! Nothing here touches a frame: these functions turn data into positions,
//! bins and heights so views only have to paint, and so the arithmetic can
//! be tested without rendering.

/// Values drawn by the contour view.
pub const CONTOUR_LEVELS: [u8; 5] = [0, 2, 4, 6, 8];

/// Histogram bins when none are configured.
pub const DEFAULT_BINS: usize = 20;

/// Residue classes in the distribution view when no modulus is given.
pub const DEFAULT_RESIDUES: u64 = 5;

/// Tiles per side in the tiling view.
pub const TILE_SIDE: usize = 10;

// ---------------------------------------------------------------------------
// Ulam spiral
// ---------------------------------------------------------------------------

/// Offsets `(dx, dy)` of an Ulam spiral walk from the centre.
///
/// Starts at `(0, 0)`, steps right, then turns left (counter-clockwise on
/// screen, where `dy` grows downwards) after every run. The run length grows
/// by one every second turn: 1, 1, 2, 2, 3, 3, ...
#[derive(Debug, Clone)]
pub struct UlamSpiral {
    pos: (i32, i32),
    dir: usize,
    run: u32,
    left_in_run: u32,
    turns: u32,
    started: bool,
}

// right, up, left, down
const DIRS: [(i32, i32); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

impl UlamSpiral {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pos: (0, 0),
            dir: 0,
            run: 1,
            left_in_run: 1,
            turns: 0,
            started: false,
        }
    }

    /// Ring index of an offset: 0 for the centre, 1 for the 3×3 ring, ...
    #[must_use]
    pub fn ring(dx: i32, dy: i32) -> u32 {
        dx.unsigned_abs().max(dy.unsigned_abs())
    }
}

impl Default for UlamSpiral {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for UlamSpiral {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.pos);
        }
        let (dx, dy) = DIRS[self.dir];
        self.pos = (self.pos.0.saturating_add(dx), self.pos.1.saturating_add(dy));
        self.left_in_run -= 1;
        if self.left_in_run == 0 {
            self.dir = (self.dir + 1) % 4;
            self.turns += 1;
            if self.turns % 2 == 0 {
                self.run += 1;
            }
            self.left_in_run = self.run;
        }
        Some(self.pos)
    }
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Counts of `values` in `bins` equal-width bins over `[0, max]`.
///
/// The maximum value lands in the last bin. With `bins == 0` the result is
/// empty; with no values every bin is zero.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn histogram(values: &[u64], bins: usize) -> Vec<usize> {
    let mut counts = vec![0; bins];
    if bins == 0 {
        return counts;
    }
    let max = values.iter().copied().max().unwrap_or(0);
    for &v in values {
        let idx = if max == 0 {
            0
        } else {
            // Truncation is the binning rule; the clamp folds `max` into the last bin.
            ((v as f64 / max as f64) * bins as f64) as usize
        };
        counts[idx.min(bins - 1)] += 1;
    }
    counts
}

/// Counts per residue class `value mod m`, indexed by residue.
///
/// Empty for `m == 0`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn residue_counts(values: &[u64], m: u64) -> Vec<usize> {
    if m == 0 {
        return Vec::new();
    }
    // One bar per row; anything past a screenful of classes is never drawn.
    let classes = usize::try_from(m).unwrap_or(usize::MAX).min(4096);
    let mut counts = vec![0; classes];
    for &v in values {
        let r = (v % m) as usize;
        if let Some(c) = counts.get_mut(r) {
            *c += 1;
        }
    }
    counts
}

/// Share of `count` in `total` as a percentage; 0 when `total` is 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

#[inline]
#[must_use]
pub fn is_contour_level(v: u8) -> bool {
    CONTOUR_LEVELS.contains(&v)
}

// ---------------------------------------------------------------------------
// Scaling
// ---------------------------------------------------------------------------

/// Scale `value` in `[0, max]` to `[0, span]`, rounded.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn scale(value: u64, max: u64, span: u16) -> u16 {
    if max == 0 {
        return 0;
    }
    let t = (value.min(max) as f64) / (max as f64);
    (t * f64::from(span)).round() as u16
}

/// A bar of `eighths` eighth-rows, as `(full rows, partial glyph)`.
#[must_use]
pub const fn eighth_blocks(eighths: u32) -> (u32, Option<char>) {
    const PARTIAL: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
    let full = eighths / 8;
    let rest = (eighths % 8) as usize;
    (full, if rest == 0 { None } else { Some(PARTIAL[rest]) })
}

/// Smallest stride `s ≥ 1` such that sampling every `s`-th row and column
/// of a `rows × cols` grid fits a `width × height` area under `fits`.
#[must_use]
pub fn sample_stride(rows: usize, cols: usize, fits: impl Fn(usize, usize) -> bool) -> usize {
    let mut s = 1;
    while s < rows.max(cols) {
        if fits(rows.div_ceil(s), cols.div_ceil(s)) {
            return s;
        }
        s += 1;
    }
    s.max(1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
