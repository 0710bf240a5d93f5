//! # chromath-view: frames for number views
//!
//! Turns a value sequence or a digit grid into a [`FrameBuffer`] ready for
//! the output stage:
//!
//! - **[`layout`]**: spiral walk, bins, residues, scaling (no painting)
//! - **[`chrome`]**: caption row, legend and frame assembly
//! - **[`sequence`]**: spiral, histogram, distribution, tiling, scatter
//! - **[`grid`]**: heatmap, contour, surface
//!
//! Every view fills the whole frame, never panics on empty data or a tiny
//! frame, and paints a caption naming the view, the dataset and the
//! transform.

pub mod chrome;
pub mod grid;
pub mod layout;
pub mod sequence;

use std::fmt;

use chromath_core::error::{ParamError, ParamErrorKind};
use chromath_core::Grid;
use chromath_palette::{Palette, Scheme};
use chromath_term::buffer::FrameBuffer;

pub use chrome::Caption;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Everything a view needs besides the data.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Frame width in columns.
    pub width: u16,
    /// Frame height in rows.
    pub height: u16,
    /// Colors for digits, residues and tiles.
    pub palette: Palette,
    /// Colors for everything else.
    pub scheme: Scheme,
    /// Histogram bins.
    pub bins: usize,
    /// Modulus for the distribution view.
    pub residues: u64,
    /// The frame will be written without color, so values must be legible
    /// from glyphs alone.
    pub text_only: bool,
}

impl RenderOptions {
    #[must_use]
    pub fn new(width: u16, height: u16, palette: Palette) -> Self {
        Self {
            width,
            height,
            palette,
            scheme: Scheme::light(),
            bins: layout::DEFAULT_BINS,
            residues: layout::DEFAULT_RESIDUES,
            text_only: false,
        }
    }
}

// ---------------------------------------------------------------------------
// View kinds
// ---------------------------------------------------------------------------

/// Views of a value sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SequenceView {
    #[default]
    Spiral,
    Histogram,
    Distribution,
    Tiling,
    Scatter,
}

impl SequenceView {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spiral => "spiral",
            Self::Histogram => "histogram",
            Self::Distribution => "distribution",
            Self::Tiling => "tiling",
            Self::Scatter => "scatter",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Spiral,
            Self::Histogram,
            Self::Distribution,
            Self::Tiling,
            Self::Scatter,
        ]
    }

    /// # Errors
    ///
    /// Returns a [`ParamError`] for `view` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, ParamError> {
        let key = name.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|v| v.name() == key)
            .ok_or_else(|| unknown_view(name))
    }

    /// Render `values` as this view.
    #[must_use]
    pub fn render(self, values: &[u64], caption: &Caption, opts: &RenderOptions) -> FrameBuffer {
        match self {
            Self::Spiral => sequence::render_spiral(values, caption, opts),
            Self::Histogram => sequence::render_histogram(values, caption, opts),
            Self::Distribution => sequence::render_distribution(values, caption, opts),
            Self::Tiling => sequence::render_tiling(values, caption, opts),
            Self::Scatter => sequence::render_scatter(values, caption, opts),
        }
    }
}

/// Views of a digit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GridView {
    #[default]
    Heatmap,
    Contour,
    Surface,
}

impl GridView {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heatmap => "heatmap",
            Self::Contour => "contour",
            Self::Surface => "surface",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Heatmap, Self::Contour, Self::Surface]
    }

    /// # Errors
    ///
    /// Returns a [`ParamError`] for `view` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, ParamError> {
        let key = name.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|v| v.name() == key)
            .ok_or_else(|| unknown_view(name))
    }

    /// Render `grid` as this view.
    #[must_use]
    pub fn render(self, grid: &Grid, caption: &Caption, opts: &RenderOptions) -> FrameBuffer {
        match self {
            Self::Heatmap => grid::render_heatmap(grid, caption, opts),
            Self::Contour => grid::render_contour(grid, caption, opts),
            Self::Surface => grid::render_surface(grid, caption, opts),
        }
    }
}

impl fmt::Display for SequenceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for GridView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn unknown_view(name: &str) -> ParamError {
    ParamError::new("view", ParamErrorKind::UnknownName(name.to_string()))
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------
