//! # chromath-palette: colors for number views
//!
//! Maps digits, residues and bins to colors, and supplies the fixed chrome
//! colors every view shares.
//!
//! # Architecture
//!
//! ```text
//! HuePattern + base hue + size        hex table
//!     │                                  │
//!     ▼                                  ▼
//! pattern.rs:  hue angles           builtin.rs: named lookup
//!     │                                  │
//!     ▼                                  │
//! palette.rs:  OKLCH colors  ◄───────────┘
//!     │
//!     ▼
//! contrast.rs: readable label / caption colors
//! scheme.rs:   canvas, text, bars, marks
//! ```
//!
//! # Color Space
//!
//! Generation and adjustment happen in OKLCH (perceptually uniform). Colors
//! are gamut-mapped to sRGB before they reach a cell.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod builtin;
pub mod contrast;
pub mod palette;
pub mod pattern;
pub mod scheme;

pub use builtin::{builtin_names, builtin_palette};
pub use contrast::{contrast_ratio, label_color};
pub use palette::Palette;
pub use pattern::HuePattern;
pub use scheme::Scheme;
