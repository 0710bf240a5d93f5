//! Caption and legend: the frame around every view.
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │ heatmap · kernel grid · GRID_MOD 3     │  caption (1 row)
//! │                                        │
//! │              view body                 │
//! │                                        │
//! │  0  1  2  3  4  5  6  7  8  9          │  legend
//! └────────────────────────────────────────┘
//! ```

use std::fmt;

use unicode_width::UnicodeWidthStr;

use chromath_palette::{Scheme, label_color};

use crate::RenderOptions;
use chromath_term::buffer::{FrameBuffer, Rect};
use chromath_term::cell::{Attr, Style};
use chromath_term::color::Color;

/// Separator between caption parts.
const SEP: &str = " · ";

// ---------------------------------------------------------------------------
// Caption
// ---------------------------------------------------------------------------

/// What a frame shows: view name, dataset, and the transform if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub view: String,
    pub dataset: String,
    pub transform: Option<String>,
}

impl Caption {
    #[must_use]
    pub fn new(view: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            dataset: dataset.into(),
            transform: None,
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: impl fmt::Display) -> Self {
        self.transform = Some(transform.to_string());
        self
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEP}{}", self.view, self.dataset)?;
        if let Some(t) = &self.transform {
            write!(f, "{SEP}{t}")?;
        }
        Ok(())
    }
}

/// Paint the caption in bold text color, one column in from the left.
pub fn paint_caption(frame: &mut FrameBuffer, rect: Rect, caption: &Caption, scheme: &Scheme) {
    if rect.is_empty() {
        return;
    }
    let style = Style::new(scheme.text.to_cell_color(), scheme.canvas.to_cell_color())
        .with_attrs(Attr::BOLD);
    frame.paint_text(rect.x + 1, rect.y, &caption.to_string(), style, Some(rect));
}

// ---------------------------------------------------------------------------
// Legend
// ---------------------------------------------------------------------------

/// One legend item: a colored swatch with a label inside it, optionally
/// followed by a note in muted text.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub swatch: Color,
    pub label: String,
    pub note: Option<String>,
}

impl LegendEntry {
    #[must_use]
    pub fn new(swatch: Color, label: impl Into<String>) -> Self {
        Self {
            swatch,
            label: label.into(),
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Columns taken, including the gap after it.
    #[must_use]
    pub fn width(&self) -> usize {
        let note = self.note.as_ref().map_or(0, |n| n.width() + 1);
        self.label.width() + 2 + note + 1
    }
}

/// Rows a legend of `entries` needs at `width` columns (at least 1).
#[must_use]
pub fn legend_rows(entries: &[LegendEntry], width: u16) -> u16 {
    let avail = usize::from(width.saturating_sub(2)).max(1);
    let mut rows = 1u16;
    let mut used = 0;
    for e in entries {
        let w = e.width();
        if used > 0 && used + w > avail {
            rows = rows.saturating_add(1);
            used = 0;
        }
        used += w;
    }
    rows
}

/// Paint swatches left to right, wrapping within `rect`. Entries that do
/// not fit are dropped.
pub fn paint_legend(frame: &mut FrameBuffer, rect: Rect, entries: &[LegendEntry], scheme: &Scheme) {
    if rect.is_empty() {
        return;
    }
    let left = rect.x + 1;
    let right = rect.right().saturating_sub(1);
    let canvas = scheme.canvas.to_cell_color();
    let muted = Style::new(scheme.muted.to_cell_color(), canvas);
    let (mut x, mut y) = (left, rect.y);
    for e in entries {
        let w = u16::try_from(e.width()).unwrap_or(u16::MAX);
        if x > left && x.saturating_add(w) > right {
            x = left;
            y += 1;
        }
        if y >= rect.bottom() {
            break;
        }
        let swatch = Style::new(label_color(e.swatch).to_cell_color(), e.swatch.to_cell_color());
        x += frame.paint_text(x, y, &format!(" {} ", e.label), swatch, Some(rect));
        if let Some(note) = &e.note {
            x += frame.paint_text(x, y, " ", muted, Some(rect));
            x += frame.paint_text(x, y, note, muted, Some(rect));
        }
        x = x.saturating_add(1);
    }
}

/// What goes under the body: swatches, or a one-line summary.
#[derive(Debug, Clone, PartialEq)]
pub enum Legend {
    Swatches(Vec<LegendEntry>),
    Note(String),
}

impl Legend {
    /// Rows this legend takes at `width` columns.
    #[must_use]
    pub fn rows(&self, width: u16) -> u16 {
        match self {
            Self::Swatches(entries) => legend_rows(entries, width),
            Self::Note(_) => 1,
        }
    }
}

/// Paint a line of muted text (for views whose legend is a summary).
pub fn paint_note(frame: &mut FrameBuffer, rect: Rect, text: &str, scheme: &Scheme) {
    if rect.is_empty() {
        return;
    }
    let style = Style::new(scheme.muted.to_cell_color(), scheme.canvas.to_cell_color());
    frame.paint_text(rect.x + 1, rect.y, text, style, Some(rect));
}

// ---------------------------------------------------------------------------
// Frame assembly
// ---------------------------------------------------------------------------

/// `(caption, body, legend)` areas of a frame: one caption row on top,
/// `legend_rows` at the bottom, and a body between them with a one-column
/// margin on each side.
#[must_use]
pub const fn split_frame(area: Rect, legend_rows: u16) -> (Rect, Rect, Rect) {
    let (caption, rest) = area.split_top(1);
    let (body, legend) = rest.split_bottom(legend_rows);
    let body = Rect::new(
        body.x.saturating_add(1),
        body.y,
        body.width.saturating_sub(2),
        body.height,
    );
    (caption, body, legend)
}

/// Build a frame on the canvas color: `paint_body` draws into the body
/// area, then the caption and legend are painted around it.
pub fn compose(
    opts: &RenderOptions,
    caption: &Caption,
    legend: &Legend,
    paint_body: impl FnOnce(&mut FrameBuffer, Rect),
) -> FrameBuffer {
    let scheme = &opts.scheme;
    let mut frame = FrameBuffer::filled(opts.width, opts.height, scheme.canvas.to_cell_color());
    let (caption_area, body, legend_area) = split_frame(frame.area(), legend.rows(opts.width));
    paint_body(&mut frame, body);
    paint_caption(&mut frame, caption_area, caption, scheme);
    match legend {
        Legend::Swatches(entries) => paint_legend(&mut frame, legend_area, entries, scheme),
        Legend::Note(text) => paint_note(&mut frame, legend_area, text, scheme),
    }
    frame
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row_text(frame: &FrameBuffer, y: u16) -> String {
        frame.to_text().lines().nth(usize::from(y)).unwrap_or_default().to_string()
    }

    // ── Caption ──────────────────────────────────────────────────────────

    #[test]
    fn caption_text() {
        let c = Caption::new("histogram", "semiprimes");
        assert_eq!(c.to_string(), "histogram · semiprimes");
        let c = c.with_transform("MOD 5");
        assert_eq!(c.to_string(), "histogram · semiprimes · MOD 5");
    }

    #[test]
    fn caption_is_painted_bold() {
        let mut fb = FrameBuffer::new(40, 1);
        let area = fb.area();
        paint_caption(&mut fb, area, &Caption::new("spiral", "semiprimes"), &Scheme::light());
        assert_eq!(row_text(&fb, 0), " spiral · semiprimes");
        assert!(fb.get(1, 0).unwrap().attrs.contains(Attr::BOLD));
    }

    #[test]
    fn caption_is_clipped() {
        let mut fb = FrameBuffer::new(8, 1);
        let area = fb.area();
        paint_caption(&mut fb, area, &Caption::new("histogram", "x"), &Scheme::light());
        assert_eq!(row_text(&fb, 0), " histogr");
    }

    // ── Legend ───────────────────────────────────────────────────────────

    #[test]
    fn legend_swatches() {
        let mut fb = FrameBuffer::new(30, 1);
        let entries = vec![
            LegendEntry::new(Color::BLACK, "0"),
            LegendEntry::new(Color::WHITE, "1").with_note("odd"),
        ];
        let area = fb.area();
        paint_legend(&mut fb, area, &entries, &Scheme::light());
        assert_eq!(row_text(&fb, 0), "  0   1  odd");
        // Label on black is white.
        assert_eq!(fb.get(2, 0).unwrap().fg.to_rgb8(), Some((255, 255, 255)));
    }

    #[test]
    fn legend_wraps_and_counts_rows() {
        let entries: Vec<_> = (0..10)
            .map(|d| LegendEntry::new(Color::rgb8(128, 128, 128), d.to_string()))
            .collect();
        // Each entry is 4 columns; 12 usable columns hold 3 per row.
        assert_eq!(legend_rows(&entries, 14), 4);
        assert_eq!(legend_rows(&entries, 200), 1);
        assert_eq!(legend_rows(&[], 10), 1);

        let mut fb = FrameBuffer::new(14, 2);
        let area = fb.area();
        paint_legend(&mut fb, area, &entries, &Scheme::light());
        assert_eq!(row_text(&fb, 0), "  0   1   2");
        assert_eq!(row_text(&fb, 1), "  3   4   5");
    }

    // ── Frame assembly ───────────────────────────────────────────────────

    #[test]
    fn frame_split() {
        let (caption, body, legend) = split_frame(Rect::new(0, 0, 40, 20), 2);
        assert_eq!(caption, Rect::new(0, 0, 40, 1));
        assert_eq!(body, Rect::new(1, 1, 38, 17));
        assert_eq!(legend, Rect::new(0, 18, 40, 2));
    }

    #[test]
    fn frame_split_tiny() {
        let (caption, body, legend) = split_frame(Rect::new(0, 0, 1, 1), 3);
        assert_eq!(caption.height, 1);
        assert!(body.is_empty());
        assert!(legend.is_empty());
    }

    #[test]
    fn compose_paints_chrome_after_body() {
        let opts = crate::test_support::opts(30, 6);
        let frame = compose(
            &opts,
            &Caption::new("v", "d"),
            &Legend::Note("note".into()),
            |fb, body| {
                // Cover everything; chrome is painted afterwards.
                fb.fill_rect(Rect::new(0, 0, 30, 6), opts.scheme.bar.to_cell_color());
                assert_eq!(body, Rect::new(1, 1, 28, 4));
            },
        );
        let text = frame.to_text();
        assert!(text.starts_with(" v · d\n"), "{text}");
        assert!(text.ends_with(" note\n"), "{text}");
    }

    #[test]
    fn empty_rect_paints_nothing() {
        let mut fb = FrameBuffer::new(4, 1);
        let before = fb.clone();
        paint_legend(&mut fb, Rect::new(0, 0, 0, 0), &[LegendEntry::new(Color::WHITE, "x")], &Scheme::light());
        paint_note(&mut fb, Rect::new(0, 0, 0, 0), "note", &Scheme::light());
        assert_eq!(fb, before);
    }
}
