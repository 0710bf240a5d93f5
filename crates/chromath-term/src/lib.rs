// SPDX-License-Identifier: MIT
//
// chromath-term: terminal rendering for chromath.
//
// Views paint into a `FrameBuffer` of cells; the output stage encodes the
// frame as lines of text with SGR color codes at whatever depth the
// terminal supports. Colors are modelled in OKLCH so palettes can be
// generated and adjusted perceptually before being reduced to RGB or a
// palette index.
//
// There is no raw mode and no event loop. A frame is built, written once
// and the process moves on.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod color;
pub mod output;
pub mod terminal;

pub use buffer::{FrameBuffer, Rect};
pub use cell::{Attr, Cell, Style};
pub use color::{CellColor, Color};
pub use output::{ColorMode, LineWriter, OutputBuffer};
