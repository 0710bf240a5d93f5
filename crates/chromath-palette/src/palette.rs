//! Digit palettes: the bridge from values to colors.
//!
//! A [`Palette`] is an ordered list of colors. Views index it by digit
//! (0–9), by residue class or by bin; indices past the end wrap around, so
//! a four-color palette still colors a ten-digit grid.
//!
//! Palettes come either from fixed hex tables (see [`crate::builtin`]) or
//! are generated in OKLCH from a [`HuePattern`], with lightness and chroma
//! held steady so no digit visually dominates.

use chromath_term::color::{CellColor, Color};

use crate::pattern::HuePattern;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A named, non-empty, ordered set of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    name: String,
    colors: Vec<Color>,
}

impl Palette {
    /// Build from colors. Returns `None` if `colors` is empty.
    #[must_use]
    pub fn new(name: impl Into<String>, colors: Vec<Color>) -> Option<Self> {
        (!colors.is_empty()).then(|| Self {
            name: name.into(),
            colors,
        })
    }

    /// Build from `#rrggbb` / `#rgb` strings. Returns `None` if the list is
    /// empty or any entry fails to parse.
    #[must_use]
    pub fn from_hex(name: impl Into<String>, hex: &[&str]) -> Option<Self> {
        let colors = hex.iter().map(|h| Color::hex(h)).collect::<Option<Vec<_>>>()?;
        Self::new(name, colors)
    }

    /// Generate `n` colors at a fixed lightness and chroma, hues laid out by
    /// `pattern`. `Mono` ramps lightness instead of hue.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn generate(
        name: impl Into<String>,
        pattern: HuePattern,
        base_hue: f32,
        n: usize,
    ) -> Option<Self> {
        let hues = pattern.hues(base_hue, n);
        let colors = hues
            .iter()
            .enumerate()
            .map(|(i, &h)| match pattern {
                HuePattern::Mono => {
                    // 0.30 (darkest) .. 0.92 (lightest).
                    let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.5 };
                    Color::oklch(0.92 - 0.62 * t, 0.09, h).to_gamut()
                }
                _ => Color::oklch(0.72, 0.15, h).to_gamut(),
            })
            .collect();
        Self::new(name, colors)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true for a constructed palette.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color at `index`, wrapping past the end.
    #[inline]
    #[must_use]
    pub fn color(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// Color for a digit value.
    #[inline]
    #[must_use]
    pub fn digit(&self, d: u8) -> Color {
        self.color(usize::from(d))
    }

    /// Truecolor cell color at `index`.
    #[inline]
    #[must_use]
    pub fn cell(&self, index: usize) -> CellColor {
        self.color(index).to_cell_color()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_is_rejected() {
        assert!(Palette::new("x", Vec::new()).is_none());
        assert!(Palette::from_hex("x", &[]).is_none());
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert!(Palette::from_hex("x", &["#ff0000", "nope"]).is_none());
    }

    #[test]
    fn hex_roundtrip() {
        let p = Palette::from_hex("p", &["#e74c3c", "#3498db"]).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.name(), "p");
        assert_eq!(p.color(0).to_hex(), "#e74c3c");
        assert_eq!(p.color(1).to_hex(), "#3498db");
    }

    #[test]
    fn index_wraps() {
        let p = Palette::from_hex("p", &["#ff0000", "#00ff00", "#0000ff"]).unwrap();
        assert_eq!(p.color(3).to_hex(), p.color(0).to_hex());
        assert_eq!(p.digit(8).to_hex(), p.color(2).to_hex());
    }

    #[test]
    fn cell_is_truecolor() {
        let p = Palette::from_hex("p", &["#3498db"]).unwrap();
        assert_eq!(p.cell(0), CellColor::Rgb(0x34, 0x98, 0xdb));
    }

    #[test]
    fn generated_count_and_gamut() {
        for &pattern in HuePattern::all() {
            let p = Palette::generate("g", pattern, 25.0, 10).unwrap();
            assert_eq!(p.len(), 10);
            assert!(p.colors().iter().all(|c| c.in_gamut()), "{}", pattern.name());
        }
        assert!(Palette::generate("g", HuePattern::Golden, 0.0, 0).is_none());
    }

    #[test]
    fn mono_is_a_lightness_ramp() {
        let p = Palette::generate("m", HuePattern::Mono, 250.0, 5).unwrap();
        let ls: Vec<f32> = p.colors().iter().map(|c| c.l).collect();
        assert!(ls.windows(2).all(|w| w[0] > w[1]), "{ls:?}");
    }
}
