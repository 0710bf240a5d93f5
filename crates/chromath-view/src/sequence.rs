//! Views of a value sequence: spiral, histogram, distribution, tiling and
//! scatter.
//!
//! Each `render_*` function builds a full frame: caption, body and legend.
//! Values are drawn in the order given; none of these views reorders or
//! filters the sequence beyond what it can fit.

use chromath_core::is_semiprime;
use chromath_term::buffer::{FrameBuffer, Rect};
use chromath_term::cell::Style;

use chromath_palette::label_color;

use crate::RenderOptions;
use crate::chrome::{Caption, Legend, LegendEntry, compose};
use crate::layout::{
    DEFAULT_RESIDUES, TILE_SIDE, UlamSpiral, eighth_blocks, histogram, percent, residue_counts,
    scale,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Palette slot for a value: `value mod palette length`.
#[allow(clippy::cast_possible_truncation)]
fn slot(value: u64, len: usize) -> usize {
    // The remainder is below `len`, so it fits.
    (value % len as u64) as usize
}

/// Residue label: `0`–`9`, then `a`–`z`.
fn slot_char(slot: usize) -> char {
    u32::try_from(slot)
        .ok()
        .and_then(|s| char::from_digit(s, 36))
        .unwrap_or('#')
}

fn to_i32(v: u16) -> i32 {
    i32::from(v)
}

/// Frame coordinates of `(x, y)` if it lies in `rect`.
fn in_rect(rect: Rect, x: i32, y: i32) -> Option<(u16, u16)> {
    let (x, y) = (u16::try_from(x).ok()?, u16::try_from(y).ok()?);
    rect.contains(x, y).then_some((x, y))
}

fn palette_legend(opts: &RenderOptions) -> Vec<LegendEntry> {
    let len = opts.palette.len();
    (0..len)
        .map(|i| {
            let entry = LegendEntry::new(opts.palette.color(i), slot_char(i).to_string());
            if i + 1 == len {
                entry.with_note(format!("value mod {len}"))
            } else {
                entry
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Spiral
// ---------------------------------------------------------------------------

fn spiral_legend(opts: &RenderOptions) -> Vec<LegendEntry> {
    let mut legend = vec![LegendEntry::new(opts.scheme.accent, "█").with_note("semiprime")];
    legend.extend(palette_legend(opts));
    legend
}

/// Values laid along an Ulam spiral from the body's centre, two columns per
/// step. Semiprimes take the accent color; other values their palette slot.
#[must_use]
pub fn render_spiral(values: &[u64], caption: &Caption, opts: &RenderOptions) -> FrameBuffer {
    let scheme = opts.scheme;
    compose(opts, caption, &Legend::Swatches(spiral_legend(opts)), |frame, body| {
        if body.is_empty() {
            return;
        }
        let cx = to_i32(body.x) + to_i32(body.width) / 2;
        let cy = to_i32(body.y) + to_i32(body.height) / 2;
        // Past this ring every step lands outside the body.
        let last_ring = u32::from((body.width / 4).max(body.height / 2)) + 1;
        let canvas = scheme.canvas.to_cell_color();

        for (&v, (dx, dy)) in values.iter().zip(UlamSpiral::new()) {
            if UlamSpiral::ring(dx, dy) > last_ring {
                break;
            }
            let Some((x, y)) = in_rect(body, cx + dx * 2, cy + dy) else {
                continue;
            };
            let (ch, color) = if is_semiprime(v) {
                ('█', scheme.accent)
            } else {
                ('▒', opts.palette.color(slot(v, opts.palette.len())))
            };
            let style = Style::new(color.to_cell_color(), canvas);
            frame.paint(x, y, ch, style, Some(body));
            frame.paint(x + 1, y, ch, style, Some(body));
        }
    })
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width bins over `[0, max]`, bars drawn in eighth blocks, with the
/// range printed under the bars.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn render_histogram(values: &[u64], caption: &Caption, opts: &RenderOptions) -> FrameBuffer {
    let scheme = opts.scheme;
    let counts = histogram(values, opts.bins);
    let max = values.iter().copied().max().unwrap_or(0);
    let peak = counts.iter().copied().max().unwrap_or(0);
    let note = format!(
        "n={} · bins={} · max={max} · peak {peak} ({:.1}%)",
        values.len(),
        counts.len(),
        percent(peak, values.len()),
    );

    compose(opts, caption, &Legend::Note(note), |frame, body| {
        let (bars, axis) = body.split_bottom(1);
        if bars.is_empty() || counts.is_empty() {
            return;
        }
        let canvas = scheme.canvas.to_cell_color();
        let muted = Style::new(scheme.muted.to_cell_color(), canvas);
        let bar = Style::new(scheme.bar.to_cell_color(), canvas);
        let top = Style::new(scheme.outline.to_cell_color(), canvas);

        let shown = counts.len().min(usize::from(bars.width));
        let slot = bars.width / u16::try_from(shown).unwrap_or(u16::MAX).max(1);
        let bar_w = if slot >= 3 { slot - 1 } else { slot };
        let span = u32::from(bars.height) * 8;

        for (i, &count) in counts.iter().take(shown).enumerate() {
            if count == 0 || peak == 0 {
                continue;
            }
            let eighths = ((count as f64 / peak as f64) * f64::from(span)).round() as u32;
            let (full, partial) = eighth_blocks(eighths.max(1));
            let x0 = bars.x + slot * u16::try_from(i).unwrap_or(u16::MAX);
            let top_row = bars.bottom() - 1 - u16::try_from(full).unwrap_or(0).min(bars.height);
            for dx in 0..bar_w {
                let x = x0 + dx;
                for k in 0..full {
                    let y = bars.bottom() - 1 - u16::try_from(k).unwrap_or(0);
                    let style = if k + 1 == full && partial.is_none() { top } else { bar };
                    frame.paint(x, y, '█', style, Some(bars));
                }
                if let Some(ch) = partial {
                    frame.paint(x, top_row, ch, top, Some(bars));
                }
            }
        }

        frame.paint_text(axis.x, axis.y, "0", muted, Some(axis));
        let max_label = max.to_string();
        let label_w = u16::try_from(max_label.len()).unwrap_or(0);
        let x = axis.right().saturating_sub(label_w).max(axis.x + 2);
        frame.paint_text(x, axis.y, &max_label, muted, Some(axis));
    })
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// One horizontal bar per residue class `value mod m`, with percentages.
#[must_use]
pub fn render_distribution(values: &[u64], caption: &Caption, opts: &RenderOptions) -> FrameBuffer {
    let scheme = opts.scheme;
    let m = if opts.residues == 0 { DEFAULT_RESIDUES } else { opts.residues };
    let counts = residue_counts(values, m);
    let total = values.len();
    let peak = counts.iter().copied().max().unwrap_or(0);

    // Caption and note take two rows; one bar per remaining row.
    let visible = counts.len().min(usize::from(opts.height.saturating_sub(2)));
    let note = if u64::try_from(visible).unwrap_or(u64::MAX) < m {
        format!("mod {m} · {total} values · first {visible} classes")
    } else {
        format!("mod {m} · {total} values")
    };

    compose(opts, caption, &Legend::Note(note), |frame, body| {
        if body.is_empty() {
            return;
        }
        let canvas = scheme.canvas.to_cell_color();
        let text = Style::new(scheme.text.to_cell_color(), canvas);
        let muted = Style::new(scheme.muted.to_cell_color(), canvas);

        let label_w = u16::try_from(m.saturating_sub(1).to_string().len()).unwrap_or(0);
        let pct_w = 7; // " 100.0%"
        let span = body.width.saturating_sub(label_w + 1 + pct_w);

        for (r, &count) in counts.iter().enumerate().take(usize::from(body.height)) {
            let y = body.y + u16::try_from(r).unwrap_or(0);
            let label = format!("{r:>w$}", w = usize::from(label_w));
            let mut x = body.x + frame.paint_text(body.x, y, &label, text, Some(body)) + 1;

            let color = opts.palette.color(r);
            let style = Style::new(color.to_cell_color(), canvas);
            let len = scale(count as u64, peak as u64, span);
            for _ in 0..len {
                frame.paint(x, y, '█', style, Some(body));
                x += 1;
            }
            frame.paint_text(x, y, &format!(" {:.1}%", percent(count, total)), muted, Some(body));
        }
    })
}

// ---------------------------------------------------------------------------
// Tiling
// ---------------------------------------------------------------------------

/// The first hundred values as a 10×10 board of colored tiles, each
/// labelled with its palette slot.
#[must_use]
pub fn render_tiling(values: &[u64], caption: &Caption, opts: &RenderOptions) -> FrameBuffer {
    let scheme = opts.scheme;
    let legend = Legend::Swatches(palette_legend(opts));

    compose(opts, caption, &legend, |frame, body| {
        if body.is_empty() {
            return;
        }
        let side = u16::try_from(TILE_SIDE).unwrap_or(10);
        let tile_w = (body.width / side).max(1);
        let tile_h = (body.height / side).max(1);
        let fill_w = if tile_w >= 3 { tile_w - 1 } else { tile_w };
        let len = opts.palette.len();

        for idx in 0..TILE_SIDE * TILE_SIDE {
            let (r, c) = (idx / TILE_SIDE, idx % TILE_SIDE);
            let x = body.x + tile_w * u16::try_from(c).unwrap_or(0);
            let y = body.y + tile_h * u16::try_from(r).unwrap_or(0);
            let Some(tile) = Rect::new(x, y, fill_w, tile_h).intersect(body) else {
                continue;
            };
            match values.get(idx) {
                Some(&v) => {
                    let s = slot(v, len);
                    let color = opts.palette.color(s);
                    frame.fill_rect(tile, color.to_cell_color());
                    let style = Style::new(label_color(color).to_cell_color(), color.to_cell_color());
                    let lx = tile.x + tile.width / 2;
                    let ly = tile.y + tile.height / 2;
                    frame.paint(lx, ly, slot_char(s), style, Some(tile));
                }
                None => frame.fill_rect(tile, scheme.empty.to_cell_color()),
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// Value against position: column `i mod width`, row scaled from the value.
#[must_use]
pub fn render_scatter(values: &[u64], caption: &Caption, opts: &RenderOptions) -> FrameBuffer {
    let scheme = opts.scheme;
    let max = values.iter().copied().max().unwrap_or(0);
    let body_w = opts.width.saturating_sub(2).max(1);
    let note = format!("x = index mod {body_w} · y = value 0..={max}");

    compose(opts, caption, &Legend::Note(note), |frame, body| {
        if body.is_empty() {
            return;
        }
        let style = Style::new(scheme.point.to_cell_color(), scheme.canvas.to_cell_color());
        let width = usize::from(body.width);
        for (i, &v) in values.iter().enumerate() {
            let x = body.x + u16::try_from(i % width).unwrap_or(0);
            let y = body.bottom() - 1 - scale(v, max, body.height - 1);
            frame.paint(x, y, '•', style, Some(body));
        }
    })
}
