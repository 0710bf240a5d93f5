//! Named palettes, ready to use.
//!
//! The fixed tables are plain hex lists; the generated ones are a pattern,
//! a base hue and a size.

use crate::palette::Palette;
use crate::pattern::HuePattern;

/// One color per digit 0–9.
const FLAT: [&str; 10] = [
    "#2ecc71", "#3498db", "#e74c3c", "#f1c40f", "#9b59b6",
    "#34495e", "#FF00FF", "#00FFFF", "#FFA500", "#808080",
];

const SUNSET: [&str; 10] = [
    "#e74c3c", "#e67e22", "#f1c40f", "#2ecc71", "#27ae60",
    "#3498db", "#2980b9", "#9b59b6", "#8e44ad", "#2c3e50",
];

const FIRE: [&str; 10] = [
    "#FF0000", "#FF4500", "#FF8C00", "#FFA500", "#FFFF00",
    "#ADFF2F", "#7FFF00", "#00FF00", "#32CD32", "#008000",
];

const PASTEL: [&str; 4] = ["#FFB6C1", "#87CEFA", "#98FB98", "#DDA0DD"];

const VIVID: [&str; 4] = ["#e74c3c", "#2ecc71", "#9b59b6", "#f1c40f"];

/// Residue classes mod 5.
const PIE: [&str; 5] = ["#e74c3c", "#3498db", "#2ecc71", "#f1c40f", "#9b59b6"];

/// Look up a builtin palette by name (case-insensitive).
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_palette(name: &str) -> Option<Palette> {
    let name = name.to_ascii_lowercase();
    match name.as_str() {
        "flat" => Palette::from_hex("flat", &FLAT),
        "sunset" => Palette::from_hex("sunset", &SUNSET),
        "fire" => Palette::from_hex("fire", &FIRE),
        "pastel" => Palette::from_hex("pastel", &PASTEL),
        "vivid" => Palette::from_hex("vivid", &VIVID),
        "pie" => Palette::from_hex("pie", &PIE),
        "golden" => Palette::generate("golden", HuePattern::Golden, 25.0, 10),
        "spectrum" => Palette::generate("spectrum", HuePattern::Even, 25.0, 10),
        "mono" => Palette::generate("mono", HuePattern::Mono, 250.0, 10),
        _ => None,
    }
}

/// List all builtin palette names.
#[must_use]
pub const fn builtin_names() -> &'static [&'static str] {
    &[
        "flat", "sunset", "fire", "pastel", "vivid", "pie", "golden", "spectrum", "mono",
    ]
}

/// One-line description for listings.
#[must_use]
pub fn describe(name: &str) -> &'static str {
    match name {
        "flat" => "one flat color per digit",
        "sunset" => "warm to cool, red through navy",
        "fire" => "red through yellow to green",
        "pastel" => "four soft tiling colors",
        "vivid" => "four saturated tiling colors",
        "pie" => "five residue-class colors",
        "golden" => "golden-angle hues at even lightness",
        "spectrum" => "evenly spaced hues",
        "mono" => "single-hue lightness ramp",
        _ => "",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
