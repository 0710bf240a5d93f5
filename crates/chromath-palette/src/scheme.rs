//! Fixed chrome colors shared by all views.
//!
//! Data cells take their colors from a [`crate::Palette`]; everything around
//! them (canvas, captions, bars, outlines, marks) comes from a [`Scheme`].

use chromath_term::color::Color;

use crate::contrast::{TEXT_CONTRAST, ensure_readability};

/// Non-data colors for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scheme {
    /// Frame background.
    pub canvas: Color,
    /// Caption and legend text.
    pub text: Color,
    /// Secondary text (axis ticks, counts).
    pub muted: Color,
    /// Highlighted values (semiprimes on the spiral).
    pub accent: Color,
    /// Positions with no value.
    pub empty: Color,
    /// Histogram and distribution bars.
    pub bar: Color,
    /// Bar edges.
    pub outline: Color,
    /// Scatter points.
    pub point: Color,
    /// Contour ink.
    pub ink: Color,
    /// Surface base color before shading.
    pub surface: Color,
}

impl Scheme {
    /// The light scheme every view is drawn with.
    #[must_use]
    pub fn light() -> Self {
        let canvas = Color::WHITE;
        let text = rgb(0x2c, 0x3e, 0x50);
        Self {
            canvas,
            text: ensure_readability(text, canvas, TEXT_CONTRAST),
            muted: ensure_readability(rgb(0x7f, 0x8c, 0x8d), canvas, 3.0),
            accent: rgb(0xe7, 0x4c, 0x3c),
            empty: rgb(0xf0, 0xf0, 0xf0),
            bar: rgb(0x34, 0x98, 0xdb),
            outline: rgb(0x29, 0x80, 0xb9),
            point: rgb(0xe6, 0x7e, 0x22),
            ink: text,
            surface: rgb(52, 152, 219),
        }
    }
}

impl Default for Scheme {
    fn default() -> Self {
        Self::light()
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::rgb8(r, g, b)
}
