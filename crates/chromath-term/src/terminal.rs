// SPDX-License-Identifier: MIT
//
// Terminal queries.
//
// Frames are written once to stdout, so all we need from the terminal is
// its size and whether stdout is a terminal at all (to decide on color).
//
// Safety: `ioctl(TIOCGWINSZ)` and `isatty` are the POSIX interfaces for
// these questions; each unsafe block is a single call on a zeroed struct
// or a plain fd.
#![allow(unsafe_code)]

// ─── Size ────────────────────────────────────────────────────────────────────

/// Terminal dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Size {
    /// Used when neither flags nor the terminal provide a size.
    pub const FALLBACK: Self = Self { cols: 100, rows: 40 };

    #[inline]
    #[must_use]
    pub const fn area(self) -> u32 {
        self.cols as u32 * self.rows as u32
    }

    /// Fill in the dimensions not given explicitly from `detected`, then
    /// from [`Size::FALLBACK`]. Zero is treated as "not given".
    #[must_use]
    pub fn resolve(cols: Option<u16>, rows: Option<u16>, detected: Option<Self>) -> Self {
        let base = detected.unwrap_or(Self::FALLBACK);
        Self {
            cols: cols.filter(|&c| c > 0).unwrap_or(base.cols),
            rows: rows.filter(|&r| r > 0).unwrap_or(base.rows),
        }
    }
}

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Size of the terminal attached to stdout, `None` if there is none.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    // SAFETY: winsize is plain data; ioctl only writes into it.
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };
    (result == 0 && ws.ws_col > 0 && ws.ws_row > 0).then_some(Size {
        cols: ws.ws_col,
        rows: ws.ws_row,
    })
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Whether stdout is a terminal.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    // SAFETY: isatty only inspects the descriptor.
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

/// Whether the user opted out of color through `NO_COLOR`.
#[must_use]
pub fn no_color_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area() {
        assert_eq!(Size { cols: 80, rows: 24 }.area(), 1920);
        assert_eq!(Size { cols: 0, rows: 24 }.area(), 0);
    }

    #[test]
    fn resolve_prefers_explicit_then_detected_then_fallback() {
        let detected = Some(Size { cols: 120, rows: 50 });
        assert_eq!(
            Size::resolve(Some(60), None, detected),
            Size { cols: 60, rows: 50 }
        );
        assert_eq!(Size::resolve(None, None, None), Size::FALLBACK);
        assert_eq!(
            Size::resolve(None, Some(10), None),
            Size { cols: 100, rows: 10 }
        );
    }

    #[test]
    fn resolve_ignores_zero() {
        assert_eq!(Size::resolve(Some(0), Some(0), None), Size::FALLBACK);
    }

    #[test]
    fn queries_do_not_panic() {
        let _ = get_size();
        let _ = is_tty();
        let _ = no_color_requested();
    }
}
