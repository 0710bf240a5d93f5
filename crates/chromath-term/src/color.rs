// SPDX-License-Identifier: MIT
//
// chromath-term color model.
//
// Palettes are built in OKLCH: equal steps in lightness and hue look like
// equal steps on screen, which matters when ten digits have to stay
// distinguishable side by side. Everything that reaches the terminal is
// reduced to a `CellColor`, and from there to whatever color depth the
// output supports.
//
//   OKLCH → Oklab → linear sRGB → sRGB → CellColor (Rgb / Ansi256)
//
// Single-letter names (l, c, h, a, b, r, g) follow color-science notation.
#![allow(clippy::many_single_char_names)]

use std::fmt;
use std::sync::OnceLock;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An opaque color in OKLCH space.
///
/// ```
/// use chromath_term::color::Color;
///
/// let red = Color::hex("#e74c3c").unwrap();
/// let top = red.lighten(0.1);
/// let side = red.darken(0.15);
/// assert!(top.l > red.l && side.l < red.l);
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// Lightness, 0.0 (black) to 1.0 (white).
    pub l: f32,
    /// Chroma, 0.0 (gray) to roughly 0.37.
    pub c: f32,
    /// Hue in degrees, `[0, 360)`.
    pub h: f32,
}

impl Color {
    pub const BLACK: Self = Self::oklch(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::oklch(1.0, 0.0, 0.0);

    #[inline]
    #[must_use]
    pub const fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self { l, c, h }
    }

    /// From sRGB components in `0.0..=1.0`.
    #[must_use]
    pub fn srgb(r: f32, g: f32, b: f32) -> Self {
        let (l, a, b) = linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
        let (c, h) = ab_to_chroma_hue(a, b);
        Self { l, c, h }
    }

    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::srgb(unit(r), unit(g), unit(b))
    }

    /// Parse `#RRGGBB` or `#RGB` (the `#` is optional).
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        let bytes = s.as_bytes();
        match bytes.len() {
            3 => {
                let nib = |i: usize| hex_digit(bytes[i]).map(|d| d << 4 | d);
                Some(Self::rgb8(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => {
                let byte = |i: usize| Some(hex_digit(bytes[i])? << 4 | hex_digit(bytes[i + 1])?);
                Some(Self::rgb8(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < 1e-5
    }

    // ─── Perceptual adjustments ──────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        Self {
            l: (self.l + amount).clamp(0.0, 1.0),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        self.lighten(-amount)
    }

    #[inline]
    #[must_use]
    pub const fn with_chroma(self, c: f32) -> Self {
        Self { c: c.max(0.0), ..self }
    }

    /// Interpolate toward `other`; `t = 0` is `self`, `t = 1` is `other`.
    /// Hue takes the short way around the wheel.
    #[must_use]
    pub fn mix(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let h = match (self.is_achromatic(), other.is_achromatic()) {
            (true, _) => other.h,
            (false, true) => self.h,
            (false, false) => {
                let mut d = other.h - self.h;
                if d > 180.0 {
                    d -= 360.0;
                } else if d < -180.0 {
                    d += 360.0;
                }
                wrap_hue(d.mul_add(t, self.h))
            }
        };
        Self {
            l: (other.l - self.l).mul_add(t, self.l),
            c: (other.c - self.c).mul_add(t, self.c),
            h,
        }
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    #[inline]
    fn to_oklab(self) -> (f32, f32, f32) {
        let rad = self.h.to_radians();
        (self.l, self.c * rad.cos(), self.c * rad.sin())
    }

    /// Unclamped sRGB; components may leave `0..=1` when out of gamut.
    fn to_srgb_raw(self) -> (f32, f32, f32) {
        let (l, a, b) = self.to_oklab();
        let (r, g, b) = oklab_to_linear_srgb(l, a, b);
        (linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
    }

    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let (r, g, b) = self.to_srgb_raw();
        (to_u8(r), to_u8(g), to_u8(b))
    }

    /// `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    #[must_use]
    pub fn in_gamut(self) -> bool {
        let (r, g, b) = self.to_srgb_raw();
        [r, g, b].iter().all(|v| (-1e-4..=1.0 + 1e-4).contains(v))
    }

    /// Reduce chroma (bisection) until the color is displayable in sRGB.
    #[must_use]
    pub fn to_gamut(self) -> Self {
        if self.in_gamut() {
            return self;
        }
        let (mut lo, mut hi) = (0.0f32, self.c);
        for _ in 0..16 {
            let mid = (lo + hi) * 0.5;
            if self.with_chroma(mid).in_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        self.with_chroma(lo)
    }

    /// Truecolor cell color (gamut-mapped first).
    #[must_use]
    pub fn to_cell_color(self) -> CellColor {
        let (r, g, b) = self.to_gamut().to_rgb8();
        CellColor::Rgb(r, g, b)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({:.3} {:.3} {:.1})", self.l, self.c, self.h)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        const EPS: f32 = 1e-4;
        let dh = (self.h - other.h).abs() % 360.0;
        let dh = dh.min(360.0 - dh);
        (self.l - other.l).abs() < EPS
            && (self.c - other.c).abs() < EPS
            && (self.is_achromatic() || other.is_achromatic() || dh < 1e-2)
    }
}

// ─── CellColor ───────────────────────────────────────────────────────────────

/// A color as stored in a frame cell and encoded in SGR sequences.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit color.
    Rgb(u8, u8, u8),
    /// Index into the xterm 256-color palette (0–15 are the ANSI 16).
    Ansi256(u8),
    /// The terminal's own foreground or background.
    #[default]
    Default,
}

impl CellColor {
    /// sRGB bytes, or `None` for `Default`.
    #[must_use]
    pub fn to_rgb8(self) -> Option<(u8, u8, u8)> {
        match self {
            Self::Rgb(r, g, b) => Some((r, g, b)),
            Self::Ansi256(idx) => Some(ansi256_to_rgb(idx)),
            Self::Default => None,
        }
    }

    #[must_use]
    pub fn to_color(self) -> Option<Color> {
        self.to_rgb8().map(|(r, g, b)| Color::rgb8(r, g, b))
    }

    /// Nearest entry of the 256-color palette (perceptual match).
    #[must_use]
    pub fn to_ansi256(self) -> Self {
        match self {
            Self::Rgb(r, g, b) => Self::Ansi256(nearest_ansi256(Color::rgb8(r, g, b))),
            other => other,
        }
    }

    /// Nearest of the 16 basic colors, as an `Ansi256` index in `0..16`.
    #[must_use]
    pub fn to_ansi16(self) -> Self {
        match self.to_color() {
            Some(color) => Self::Ansi256(nearest_ansi16(color)),
            None => Self::Default,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Default => f.write_str("default"),
        }
    }
}

impl From<Color> for CellColor {
    fn from(color: Color) -> Self {
        color.to_cell_color()
    }
}

// ─── xterm palette ───────────────────────────────────────────────────────────

/// xterm defaults for the 16 basic colors.
pub const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (128, 0, 0),
    (0, 128, 0),
    (128, 128, 0),
    (0, 0, 128),
    (128, 0, 128),
    (0, 128, 128),
    (192, 192, 192),
    (128, 128, 128),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (0, 0, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// RGB of a 256-palette index: basic 16, then a 6×6×6 cube, then 24 grays.
#[must_use]
pub fn ansi256_to_rgb(idx: u8) -> (u8, u8, u8) {
    match idx {
        0..=15 => ANSI16_RGB[usize::from(idx)],
        16..=231 => {
            let level = |i: u8| if i == 0 { 0 } else { 55 + 40 * i };
            let i = idx - 16;
            (level(i / 36), level(i / 6 % 6), level(i % 6))
        }
        232..=255 => {
            let v = 8 + 10 * (idx - 232);
            (v, v, v)
        }
    }
}

/// Oklab coordinates of all 256 palette entries, computed once.
fn palette_oklab() -> &'static [(f32, f32, f32); 256] {
    static TABLE: OnceLock<[(f32, f32, f32); 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [(0.0, 0.0, 0.0); 256];
        for (idx, slot) in (0u8..=255).zip(table.iter_mut()) {
            let (r, g, b) = ansi256_to_rgb(idx);
            *slot = linear_srgb_to_oklab(
                srgb_to_linear(unit(r)),
                srgb_to_linear(unit(g)),
                srgb_to_linear(unit(b)),
            );
        }
        table
    })
}

fn nearest_in(color: Color, range: std::ops::Range<usize>) -> u8 {
    let target = color.to_oklab();
    let table = palette_oklab();
    let best = range
        .min_by(|&i, &j| {
            oklab_distance_sq(target, table[i]).total_cmp(&oklab_distance_sq(target, table[j]))
        })
        .unwrap_or(0);
    u8::try_from(best).unwrap_or(0)
}

/// Perceptually nearest 256-palette index.
#[must_use]
pub fn nearest_ansi256(color: Color) -> u8 {
    nearest_in(color, 0..256)
}

/// Perceptually nearest basic color (0–15).
#[must_use]
pub fn nearest_ansi16(color: Color) -> u8 {
    nearest_in(color, 0..16)
}

// ─── Oklab math ──────────────────────────────────────────────────────────────
//
// Matrices from Björn Ottosson, "A perceptual color space for image
// processing" (2020).

#[inline]
fn wrap_hue(h: f32) -> f32 {
    h.rem_euclid(360.0)
}

#[inline]
fn ab_to_chroma_hue(a: f32, b: f32) -> (f32, f32) {
    let c = a.hypot(b);
    if c < 1e-8 {
        (0.0, 0.0)
    } else {
        (c, wrap_hue(b.atan2(a).to_degrees()))
    }
}

#[inline]
fn oklab_distance_sq(p: (f32, f32, f32), q: (f32, f32, f32)) -> f32 {
    let (dl, da, db) = (p.0 - q.0, p.1 - q.1, p.2 - q.2);
    db.mul_add(db, dl.mul_add(dl, da * da))
}

fn oklab_to_linear_srgb(l: f32, a: f32, b: f32) -> (f32, f32, f32) {
    let l_ = 0.215_803_76f32.mul_add(b, 0.396_337_78f32.mul_add(a, l));
    let m_ = 0.063_854_17f32.mul_add(-b, 0.105_561_346f32.mul_add(-a, l));
    let s_ = 1.291_485_5f32.mul_add(-b, 0.089_484_18f32.mul_add(-a, l));
    let (l3, m3, s3) = (l_ * l_ * l_, m_ * m_ * m_, s_ * s_ * s_);
    (
        0.230_969_94f32.mul_add(s3, 4.076_741_7f32.mul_add(l3, -(3.307_711_6 * m3))),
        0.341_319_38f32.mul_add(-s3, (-1.268_438f32).mul_add(l3, 2.609_757_4 * m3)),
        1.707_614_7f32.mul_add(s3, (-0.004_196_086_3f32).mul_add(l3, -(0.703_418_6 * m3))),
    )
}

fn linear_srgb_to_oklab(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let l = 0.051_445_995f32.mul_add(b, 0.412_221_47f32.mul_add(r, 0.536_332_55 * g)).cbrt();
    let m = 0.107_396_96f32.mul_add(b, 0.211_903_5f32.mul_add(r, 0.680_699_5 * g)).cbrt();
    let s = 0.629_978_7f32.mul_add(b, 0.088_302_46f32.mul_add(r, 0.281_718_84 * g)).cbrt();
    (
        0.004_072_047f32.mul_add(-s, 0.210_454_26f32.mul_add(l, 0.793_617_8 * m)),
        0.450_593_7f32.mul_add(s, 1.977_998_5f32.mul_add(l, -(2.428_592_2 * m))),
        0.808_675_77f32.mul_add(-s, 0.025_904_037f32.mul_add(l, 0.782_771_77 * m)),
    )
}

/// sRGB transfer function (linear → gamma-encoded).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f32.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Inverse sRGB transfer function.
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn unit(v: u8) -> f32 {
    f32::from(v) / 255.0
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f32) -> u8 {
    // Clamped to 0..=255 before the cast.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
