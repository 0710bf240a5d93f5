// SPDX-License-Identifier: MIT
//
// Cell: one character position of a rendered frame.
//
// A cell holds a character, resolved foreground and background colors and
// a small set of text attributes. Views never talk to the terminal; they
// fill cells, and the output stage turns rows of cells into SGR sequences.
//
// Wide characters take two columns. The left cell holds the character and
// the right one is a continuation (`'\0'`) that only carries colors.

use crate::color::CellColor;

// ─── Attributes ──────────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// SGR text attributes.
    ///
    /// ```
    /// use chromath_term::cell::Attr;
    ///
    /// let caption = Attr::BOLD | Attr::UNDERLINE;
    /// assert!(caption.contains(Attr::BOLD));
    /// assert!(!caption.contains(Attr::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1.
        const BOLD      = 1 << 0;
        /// SGR 2.
        const DIM       = 1 << 1;
        /// SGR 3.
        const ITALIC    = 1 << 2;
        /// SGR 4.
        const UNDERLINE = 1 << 3;
        /// SGR 7.
        const INVERSE   = 1 << 4;
    }
}

// ─── Style ───────────────────────────────────────────────────────────────────

/// Colors and attributes applied together when painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

impl Style {
    /// Terminal defaults, no attributes.
    pub const PLAIN: Self = Self {
        fg: CellColor::Default,
        bg: CellColor::Default,
        attrs: Attr::empty(),
    };

    #[inline]
    #[must_use]
    pub const fn new(fg: CellColor, bg: CellColor) -> Self {
        Self {
            fg,
            bg,
            attrs: Attr::empty(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn fg(fg: CellColor) -> Self {
        Self::new(fg, CellColor::Default)
    }

    #[inline]
    #[must_use]
    pub const fn with_attrs(self, attrs: Attr) -> Self {
        Self { attrs, ..self }
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

const CONTINUATION: char = '\0';

/// A single terminal cell.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Character shown, `'\0'` for the right half of a wide character.
    pub ch: char,
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

impl Cell {
    /// A blank cell in terminal default colors.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: CellColor::Default,
        bg: CellColor::Default,
        attrs: Attr::empty(),
    };

    #[inline]
    #[must_use]
    pub const fn new(ch: char, style: Style) -> Self {
        Self {
            ch,
            fg: style.fg,
            bg: style.bg,
            attrs: style.attrs,
        }
    }

    /// Right half of a wide character drawn in `style`.
    #[inline]
    #[must_use]
    pub const fn continuation(style: Style) -> Self {
        Self::new(CONTINUATION, style)
    }

    #[inline]
    #[must_use]
    pub const fn is_continuation(self) -> bool {
        self.ch == CONTINUATION
    }

    /// The style this cell is drawn in.
    #[inline]
    #[must_use]
    pub const fn style(self) -> Style {
        Style {
            fg: self.fg,
            bg: self.bg,
            attrs: self.attrs,
        }
    }

    /// Blank with default colors.
    #[inline]
    #[must_use]
    pub fn is_blank(self) -> bool {
        self == Self::EMPTY
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_continuation() {
            return f.write_str("Cell(cont)");
        }
        write!(f, "Cell({:?}", self.ch)?;
        if !self.fg.is_default() {
            write!(f, " fg={:?}", self.fg)?;
        }
        if !self.bg.is_default() {
            write!(f, " bg={:?}", self.bg)?;
        }
        if !self.attrs.is_empty() {
            write!(f, " {:?}", self.attrs)?;
        }
        f.write_str(")")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_blank_space() {
        assert!(Cell::EMPTY.is_blank());
        assert_eq!(Cell::default().ch, ' ');
        assert!(!Cell::EMPTY.is_continuation());
    }

    #[test]
    fn new_takes_style() {
        let style = Style::new(CellColor::Rgb(1, 2, 3), CellColor::Ansi256(4)).with_attrs(Attr::BOLD);
        let cell = Cell::new('x', style);
        assert_eq!(cell.style(), style);
        assert!(!cell.is_blank());
    }

    #[test]
    fn continuation_keeps_colors() {
        let style = Style::fg(CellColor::Rgb(9, 9, 9));
        let cell = Cell::continuation(style);
        assert!(cell.is_continuation());
        assert_eq!(cell.style(), Cell::new('a', style).style());
    }

    #[test]
    fn debug_lists_only_set_fields() {
        assert_eq!(format!("{:?}", Cell::EMPTY), "Cell(' ')");
        let cell = Cell::new('▀', Style::fg(CellColor::Rgb(255, 0, 0)));
        assert_eq!(format!("{cell:?}"), "Cell('▀' fg=#ff0000)");
    }
}
