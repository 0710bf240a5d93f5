//! WCAG contrast for text drawn over colored cells.
//!
//! Digit labels, captions and legend swatches sit on arbitrary palette
//! colors. Readability is measured in sRGB relative luminance (the WCAG
//! definition) but adjusted in OKLCH lightness, where steps are perceptually
//! even.

use chromath_term::color::{Color, srgb_to_linear};

/// Minimum contrast for captions and legend text.
pub const TEXT_CONTRAST: f64 = 4.5;

/// Relative luminance per WCAG 2.1, in `[0.0, 1.0]`.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_gamut().to_rgb8();
    let lin = |v: u8| f64::from(srgb_to_linear(f32::from(v) / 255.0));
    0.2126f64.mul_add(lin(r), 0.7152f64.mul_add(lin(g), 0.0722 * lin(b)))
}

/// WCAG contrast ratio, `[1.0, 21.0]`, independent of argument order.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Move `fg`'s lightness away from `bg` until the pair reaches `min_ratio`.
///
/// The search direction is chosen from the background: text over a dark
/// background gets lighter, over a light one darker. The result stays as
/// close to the original lightness as the ratio allows.
#[must_use]
pub fn ensure_readability(fg: Color, bg: Color, min_ratio: f64) -> Color {
    if contrast_ratio(fg, bg) >= min_ratio {
        return fg.to_gamut();
    }

    let lighten = relative_luminance(bg) < 0.18;
    let (mut lo, mut hi) = if lighten { (fg.l, 1.0) } else { (0.0, fg.l) };

    // Extreme of the search range, used if nothing in between qualifies.
    let mut best = if lighten { Color::WHITE } else { Color::BLACK };
    for _ in 0..32 {
        let mid = (lo + hi) * 0.5;
        let candidate = Color::oklch(mid, fg.c, fg.h).to_gamut();
        if contrast_ratio(candidate, bg) >= min_ratio {
            best = candidate;
            if lighten {
                hi = mid;
            } else {
                lo = mid;
            }
        } else if lighten {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    best
}

/// Black or white, whichever reads better over `bg`.
#[must_use]
pub fn label_color(bg: Color) -> Color {
    if contrast_ratio(Color::BLACK, bg) >= contrast_ratio(Color::WHITE, bg) {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
