// SPDX-License-Identifier: MIT
//
// Frame output.
//
// A frame is written once, top to bottom, as ordinary lines: no cursor
// addressing, no alternate screen. That keeps the output usable in a pipe
// or a file as well as on a terminal.
//
//   OutputBuffer: collects the whole frame so it reaches stdout in one write.
//
//   LineWriter: remembers the colors and attributes last emitted and only
//   writes SGR codes when the next cell differs. Each row ends with a reset
//   so a line never bleeds color into the next one.
//
//   ColorMode: the color depth the frame is encoded at. Truecolor cells are
//   downgraded to the 256 or 16 color palette, or dropped entirely for plain
//   text.

use std::io::{self, Write};

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::cell::{Attr, Cell};
use crate::color::CellColor;

// ─── ColorMode ───────────────────────────────────────────────────────────────

/// Color depth for encoding a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// 24-bit RGB.
    #[default]
    TrueColor,
    /// xterm 256-color palette.
    Ansi256,
    /// The 16 basic colors.
    Ansi16,
    /// Characters only, no escape sequences.
    Plain,
}

impl ColorMode {
    /// Reduce a cell color to what this mode can express.
    #[must_use]
    pub fn convert(self, color: CellColor) -> CellColor {
        match self {
            Self::TrueColor => color,
            Self::Ansi256 => color.to_ansi256(),
            Self::Ansi16 => color.to_ansi16(),
            Self::Plain => CellColor::Default,
        }
    }

    #[must_use]
    pub const fn is_plain(self) -> bool {
        matches!(self, Self::Plain)
    }
}

// ─── OutputBuffer ────────────────────────────────────────────────────────────

/// In-memory byte sink for a whole frame.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

impl OutputBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(16_384),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn push_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }

    /// Write everything to `w` and empty the buffer.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        w.write_all(&self.buf)?;
        w.flush()?;
        self.buf.clear();
        Ok(())
    }

    /// Write everything to stdout and empty the buffer.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        self.flush_to(&mut io::stdout().lock())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── LineWriter ──────────────────────────────────────────────────────────────

/// Emits rows of cells with the minimum SGR changes between cells.
pub struct LineWriter {
    mode: ColorMode,
    fg: Option<CellColor>,
    bg: Option<CellColor>,
    attrs: Attr,
}

impl LineWriter {
    #[must_use]
    pub const fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            fg: None,
            bg: None,
            attrs: Attr::empty(),
        }
    }

    /// Write one row, then reset (if anything was styled) and a newline.
    ///
    /// Trailing blank cells are dropped so plain output carries no padding.
    pub fn write_row(&mut self, out: &mut OutputBuffer, row: &[Cell]) -> io::Result<()> {
        let len = row.iter().rposition(|c| !c.is_blank()).map_or(0, |i| i + 1);
        for cell in &row[..len] {
            if cell.is_continuation() {
                continue;
            }
            self.apply(out, cell)?;
            out.push_char(cell.ch);
        }
        if self.fg.is_some() || self.bg.is_some() || !self.attrs.is_empty() {
            ansi::reset(out)?;
        }
        self.fg = None;
        self.bg = None;
        self.attrs = Attr::empty();
        out.write_all(b"\n")
    }

    fn apply(&mut self, out: &mut OutputBuffer, cell: &Cell) -> io::Result<()> {
        if self.mode.is_plain() {
            return Ok(());
        }
        if cell.attrs != self.attrs {
            if !self.attrs.is_empty() {
                // SGR 0 also clears colors.
                ansi::reset(out)?;
                self.fg = None;
                self.bg = None;
            }
            ansi::attrs(out, cell.attrs)?;
            self.attrs = cell.attrs;
        }
        let fg = self.mode.convert(cell.fg);
        if self.fg != Some(fg) && !(self.fg.is_none() && fg.is_default()) {
            ansi::fg(out, fg)?;
            self.fg = Some(fg);
        }
        let bg = self.mode.convert(cell.bg);
        if self.bg != Some(bg) && !(self.bg.is_none() && bg.is_default()) {
            ansi::bg(out, bg)?;
            self.bg = Some(bg);
        }
        Ok(())
    }
}

/// Encode a whole frame.
///
/// # Errors
///
/// Only from the underlying writer; an `OutputBuffer` never fails.
pub fn render_frame(frame: &FrameBuffer, mode: ColorMode, out: &mut OutputBuffer) -> io::Result<()> {
    let mut writer = LineWriter::new(mode);
    for y in 0..frame.height() {
        if let Some(row) = frame.row(y) {
            writer.write_row(out, row)?;
        }
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
