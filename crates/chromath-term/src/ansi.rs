// SPDX-License-Identifier: MIT
//
// SGR (Select Graphic Rendition) encoding.
//
// Stateless writers for the handful of escape sequences a one-shot frame
// needs: colors, attributes and reset. Deciding when to emit them is the
// `LineWriter`'s job.
use std::io::{self, Write};

use crate::cell::Attr;
use crate::color::CellColor;

/// SGR 0: back to terminal defaults.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Foreground color. Palette indices 0–15 use the short 30–37 / 90–97 forms.
pub fn fg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    color_sgr(w, color, 30, 90, 38)
}

/// Background color. Palette indices 0–15 use the short 40–47 / 100–107 forms.
pub fn bg(w: &mut impl Write, color: CellColor) -> io::Result<()> {
    color_sgr(w, color, 40, 100, 48)
}

fn color_sgr(w: &mut impl Write, color: CellColor, base: u16, bright: u16, ext: u16) -> io::Result<()> {
    match color {
        CellColor::Default => write!(w, "\x1b[{}m", base + 9),
        CellColor::Ansi256(idx @ 0..=7) => write!(w, "\x1b[{}m", base + u16::from(idx)),
        CellColor::Ansi256(idx @ 8..=15) => write!(w, "\x1b[{}m", bright + u16::from(idx - 8)),
        CellColor::Ansi256(idx) => write!(w, "\x1b[{ext};5;{idx}m"),
        CellColor::Rgb(r, g, b) => write!(w, "\x1b[{ext};2;{r};{g};{b}m"),
    }
}

/// All set attributes in one sequence, e.g. `ESC[1;4m`. Writes nothing for
/// an empty set.
pub fn attrs(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }
    const CODES: [(Attr, &str); 5] = [
        (Attr::BOLD, "1"),
        (Attr::DIM, "2"),
        (Attr::ITALIC, "3"),
        (Attr::UNDERLINE, "4"),
        (Attr::INVERSE, "7"),
    ];
    let params: Vec<&str> = CODES
        .iter()
        .filter(|(flag, _)| attr.contains(*flag))
        .map(|&(_, code)| code)
        .collect();
    write!(w, "\x1b[{}m", params.join(";"))
}
