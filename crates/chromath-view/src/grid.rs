//! Views of a digit grid: heatmap, contour and surface.
//!
//! Rows are x and columns y, as stored: grid row 0 (the first x
//! coordinate) is drawn at the top and y runs left to right. Grids larger than the body are cropped
//! (heatmap, contour) or sampled with a stride (surface); the legend says
//! which.

use chromath_core::Grid;
use chromath_term::buffer::{FrameBuffer, Rect};
use chromath_term::color::Color;
use chromath_term::cell::Style;

use crate::RenderOptions;
use crate::chrome::{Caption, Legend, LegendEntry, compose, split_frame};
use crate::layout::{CONTOUR_LEVELS, is_contour_level, sample_stride};

/// Upper half block: foreground is the top half, background the bottom.
const HALF_BLOCK: char = '▀';

/// Most rows a surface column may rise per unit of value.
const MAX_RISE: f32 = 3.0;

fn digit_char(v: u8) -> char {
    char::from_digit(u32::from(v), 10).unwrap_or('?')
}

fn crop_note(shown: (usize, usize), grid: &Grid) -> Option<String> {
    (shown != grid.shape())
        .then(|| format!("showing {}×{} of {}×{}", shown.0, shown.1, grid.rows(), grid.cols()))
}

// ---------------------------------------------------------------------------
// Heatmap
// ---------------------------------------------------------------------------

const fn heatmap_rows_per_line(opts: &RenderOptions) -> usize {
    if opts.text_only { 1 } else { 2 }
}

/// Ten digit swatches; the last one notes the crop when the grid does not
/// fit.
fn heatmap_legend(grid: &Grid, opts: &RenderOptions) -> Legend {
    let digits: Vec<LegendEntry> = (0..10u8)
        .map(|d| LegendEntry::new(opts.palette.digit(d), d.to_string()))
        .collect();
    let mut legend = Legend::Swatches(digits.clone());
    // A crop note can take another legend row, which shrinks the body again.
    for _ in 0..2 {
        let (w, h) = body_size(opts, legend.rows(opts.width));
        let shown = (
            grid.rows().min(usize::from(h) * heatmap_rows_per_line(opts)),
            grid.cols().min(usize::from(w)),
        );
        let mut entries = digits.clone();
        if let (Some(note), Some(last)) = (crop_note(shown, grid), entries.last_mut()) {
            last.note = Some(note);
        }
        legend = Legend::Swatches(entries);
    }
    legend
}

/// One palette color per digit.
///
/// In color, two grid rows share a terminal row through the half-block
/// glyph. Without color each cell is printed as its digit instead.
#[must_use]
pub fn render_heatmap(grid: &Grid, caption: &Caption, opts: &RenderOptions) -> FrameBuffer {
    let rows_per_line = heatmap_rows_per_line(opts);
    compose(opts, caption, &heatmap_legend(grid, opts), |frame, body| {
        let canvas = opts.scheme.canvas.to_cell_color();
        let color = |v: u8| opts.palette.digit(v).to_cell_color();
        for (line, y) in (body.y..body.bottom()).enumerate() {
            let top = line * rows_per_line;
            let Some(cells) = grid.row(top) else {
                break;
            };
            for (col, &v) in cells.iter().enumerate().take(usize::from(body.width)) {
                let x = body.x + u16::try_from(col).unwrap_or(u16::MAX);
                if opts.text_only {
                    frame.paint(x, y, digit_char(v), Style::new(color(v), canvas), Some(body));
                } else {
                    let below = grid.get(top + 1, col).map_or(canvas, color);
                    frame.paint(x, y, HALF_BLOCK, Style::new(color(v), below), Some(body));
                }
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Contour
// ---------------------------------------------------------------------------

/// Cells whose value is one of the contour levels are inked with their
/// digit; the rest are dotted.
#[must_use]
pub fn render_contour(grid: &Grid, caption: &Caption, opts: &RenderOptions) -> FrameBuffer {
    let (body_w, body_h) = body_size(opts, 1);
    let shown = (
        grid.rows().min(usize::from(body_h)),
        grid.cols().min(usize::from(body_w)),
    );
    let inked = grid.cells().iter().filter(|&&v| is_contour_level(v)).count();
    let levels: Vec<String> = CONTOUR_LEVELS.iter().map(u8::to_string).collect();
    let mut note = format!(
        "levels {} · {inked} of {} cells",
        levels.join(" "),
        grid.cells().len()
    );
    if let Some(crop) = crop_note(shown, grid) {
        note = format!("{note} · {crop}");
    }

    compose(opts, caption, &Legend::Note(note), |frame, body| {
        let canvas = opts.scheme.canvas.to_cell_color();
        let ink = Style::new(opts.scheme.ink.to_cell_color(), canvas);
        let faint = opts.scheme.empty.mix(opts.scheme.muted, 0.5);
        let dot = Style::new(faint.to_cell_color(), canvas);
        for (row, y) in (body.y..body.bottom()).enumerate() {
            let Some(cells) = grid.row(row) else {
                break;
            };
            for (col, &v) in cells.iter().enumerate().take(usize::from(body.width)) {
                let x = body.x + u16::try_from(col).unwrap_or(u16::MAX);
                if is_contour_level(v) {
                    frame.paint(x, y, digit_char(v), ink, Some(body));
                } else {
                    frame.paint(x, y, '·', dot, Some(body));
                }
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// How a grid is fitted into a surface body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePlan {
    /// Sample every `stride`-th row and column.
    pub stride: usize,
    /// Sampled rows and columns.
    pub rows: usize,
    pub cols: usize,
    /// Terminal rows per unit of value.
    pub rise: f32,
}

impl SurfacePlan {
    /// Fit `grid` into a `width × height` body.
    ///
    /// Rows recede up and to the right one cell each, so `rows + cols - 1`
    /// columns and `rows` base rows are needed, plus room for the tallest
    /// column above the back row.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fit(grid: &Grid, width: u16, height: u16) -> Self {
        let (w, h) = (usize::from(width), usize::from(height));
        let stride = sample_stride(grid.rows(), grid.cols(), |r, c| r + c <= w + 1 && r < h);
        let rows = grid.rows().div_ceil(stride);
        let cols = grid.cols().div_ceil(stride);
        let headroom = h.saturating_sub(rows) as f32;
        let top = f32::from(grid.max_value().max(1));
        Self {
            stride,
            rows,
            cols,
            rise: (headroom / top).min(MAX_RISE),
        }
    }

    /// Height in rows of a column for `value`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn height(&self, value: u8) -> u16 {
        (f32::from(value) * self.rise).floor() as u16
    }
}

fn surface_faces(opts: &RenderOptions) -> (Color, Color) {
    let base = opts.scheme.surface;
    (base.lighten(0.12), base.darken(0.15))
}

fn surface_legend(opts: &RenderOptions) -> Legend {
    let (top, side) = surface_faces(opts);
    Legend::Swatches(vec![
        LegendEntry::new(top, "█").with_note("top face"),
        LegendEntry::new(side, "▓").with_note("sides, height by value"),
    ])
}

/// Pseudo-3D extrusion: each cell is a column as tall as its value, drawn
/// back to front with a lighter top face and darker sides.
#[must_use]
pub fn render_surface(grid: &Grid, caption: &Caption, opts: &RenderOptions) -> FrameBuffer {
    let (top_color, side_color) = surface_faces(opts);
    let legend = surface_legend(opts);
    let (body_w, body_h) = body_size(opts, legend.rows(opts.width));
    let plan = SurfacePlan::fit(grid, body_w, body_h);

    compose(opts, caption, &legend, |frame, body| {
        if body.is_empty() || plan.rows == 0 || plan.cols == 0 {
            return;
        }
        let canvas = opts.scheme.canvas.to_cell_color();
        let top = Style::new(top_color.to_cell_color(), canvas);
        let side = Style::new(side_color.to_cell_color(), canvas);
        let rows = u16::try_from(plan.rows).unwrap_or(u16::MAX);

        // Back row first so nearer columns overdraw farther ones.
        for r in 0..plan.rows {
            let r16 = u16::try_from(r).unwrap_or(u16::MAX);
            let Some(base_y) = body.bottom().checked_sub(rows - r16) else {
                continue;
            };
            for c in 0..plan.cols {
                let Some(v) = grid.get(r * plan.stride, c * plan.stride) else {
                    continue;
                };
                let x = body.x
                    .saturating_add(u16::try_from(c).unwrap_or(u16::MAX))
                    .saturating_add(rows - 1 - r16);
                let h = plan.height(v);
                let top_y = base_y.saturating_sub(h).max(body.y);
                for y in top_y + 1..=base_y {
                    frame.paint(x, y, '▓', side, Some(body));
                }
                frame.paint(x, top_y, '█', top, Some(body));
            }
        }
    })
}

/// Body size for a frame whose legend takes `legend_rows` rows.
fn body_size(opts: &RenderOptions, legend_rows: u16) -> (u16, u16) {
    let (_, body, _) = split_frame(Rect::new(0, 0, opts.width, opts.height), legend_rows);
    (body.width, body.height)
}
