//! Number generator: the two base datasets.
//!
//! - **Semiprimes**: products of two primes drawn from `2..prime_limit`,
//!   collected until `count` distinct values are found, returned ascending.
//! - **Kernel grid**: `kernel(x*y - (x + y))` over two coordinate ranges,
//!   where `kernel` repeatedly sums decimal digits down to one digit.
//!
//! Everything here is a pure function of its arguments.
//!
//! # Pair enumeration order
//!
//! When more products exist than `count`, the enumeration order decides
//! which ones are kept. Two orders are supported:
//!
//! | Pairing       | Pairs visited                            | count = 5            |
//! |---------------|------------------------------------------|----------------------|
//! | `Triangular`  | p ≤ q, smallest product first (default)  | `[4, 6, 9, 10, 14]`  |
//! | `Cartesian`   | every (p, q), by increasing p then q     | `[4, 6, 10, 14, 22]` |
//!
//! Triangular pairs are merged row by row through a min-heap, so a
//! truncated result is always the `count` smallest semiprimes of the range.
//! Cartesian keeps the plain nested loop and its larger, gappier output.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ParamError, ParamErrorKind};
use crate::grid::{CoordRange, Grid};

/// Default number of semiprimes to generate.
pub const DEFAULT_COUNT: usize = 1000;

/// Default exclusive upper bound of the prime candidate range.
pub const DEFAULT_PRIME_LIMIT: u64 = 10_000;

/// Default coordinate range on both grid axes.
pub const DEFAULT_GRID_RANGE: CoordRange = CoordRange::new(-50, 50);

/// Largest accepted prime limit. Keeps the sieve near 10 MB and every
/// product of two candidates far below `u64::MAX`.
pub const MAX_PRIME_LIMIT: u64 = 10_000_000;

/// Largest absolute grid coordinate accepted.
pub const MAX_GRID_COORD: i64 = 1_000_000;

/// Largest number of coordinates accepted along one grid axis.
pub const MAX_GRID_SPAN: usize = 10_000;

// ---------------------------------------------------------------------------
// Primes
// ---------------------------------------------------------------------------

/// Trial-division primality test.
#[must_use]
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2u64;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

/// All primes in `2..limit`, ascending (sieve of Eratosthenes).
///
/// `limit` is clamped to [`MAX_PRIME_LIMIT`].
#[must_use]
pub fn primes_below(limit: u64) -> Vec<u64> {
    let limit = usize::try_from(limit.min(MAX_PRIME_LIMIT)).unwrap_or(0);
    if limit < 3 {
        return Vec::new();
    }
    let mut composite = vec![false; limit];
    let mut i = 2;
    while i * i < limit {
        if !composite[i] {
            for j in (i * i..limit).step_by(i) {
                composite[j] = true;
            }
        }
        i += 1;
    }
    (2..limit)
        .filter(|&n| !composite[n])
        .map(|n| n as u64)
        .collect()
}

/// Whether `n` has exactly two prime factors, counted with multiplicity.
///
/// `4 = 2·2` and `6 = 2·3` are semiprimes; `8 = 2·2·2` and `7` are not.
#[must_use]
pub fn is_semiprime(n: u64) -> bool {
    if n < 4 {
        return false;
    }
    let mut rest = n;
    let mut factors = 0u32;
    let mut d = 2u64;
    while d * d <= rest {
        while rest % d == 0 {
            rest /= d;
            factors += 1;
            if factors > 2 {
                return false;
            }
        }
        d += 1;
    }
    if rest > 1 {
        factors += 1;
    }
    factors == 2
}

// ---------------------------------------------------------------------------
// Semiprimes
// ---------------------------------------------------------------------------

/// Order in which prime pairs are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pairing {
    /// Unordered pairs `p ≤ q`, smallest product first.
    #[default]
    Triangular,
    /// All ordered pairs `(p, q)`, increasing `p` then `q`.
    Cartesian,
}

impl Pairing {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Triangular => "triangular",
            Self::Cartesian => "cartesian",
        }
    }

    /// Parse a pairing from its name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns a [`ParamError`] for an unknown name.
    pub fn from_name(name: &str) -> Result<Self, ParamError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "triangular" => Ok(Self::Triangular),
            "cartesian" => Ok(Self::Cartesian),
            _ => Err(ParamError::new(
                "pairing",
                ParamErrorKind::UnknownName(name.to_string()),
            )),
        }
    }
}

/// Tuning for [`generate_semiprimes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemiprimeOptions {
    /// Primes are drawn from `2..prime_limit`.
    pub prime_limit: u64,
    /// Pair enumeration order.
    pub pairing: Pairing,
}

impl Default for SemiprimeOptions {
    fn default() -> Self {
        Self {
            prime_limit: DEFAULT_PRIME_LIMIT,
            pairing: Pairing::Triangular,
        }
    }
}

/// Generate up to `count` distinct semiprimes, sorted ascending.
///
/// Pairs are visited in `options.pairing` order and each new product is
/// kept until `count` values are collected. If the prime range runs out
/// first, every product found is returned.
#[must_use]
pub fn generate_semiprimes(count: usize, options: &SemiprimeOptions) -> Vec<u64> {
    let primes = primes_below(options.prime_limit);
    debug!(
        primes = primes.len(),
        limit = options.prime_limit,
        pairing = options.pairing.name(),
        "enumerated prime candidates"
    );

    let mut out = match options.pairing {
        Pairing::Triangular => smallest_products(&primes, count),
        Pairing::Cartesian => nested_products(&primes, count),
    };
    out.sort_unstable();
    out
}

/// Products `p·q` with `p ≤ q`, in ascending order, until `count` are found.
///
/// Row `i` of the merge is `primes[i] * primes[j]` for `j >= i`; each row is
/// ascending, so popping the heap minimum walks all products in order.
/// Unique factorization makes every triangular product distinct.
fn smallest_products(primes: &[u64], count: usize) -> Vec<u64> {
    let mut out = Vec::with_capacity(count.min(1 << 16));
    let mut heap: BinaryHeap<Reverse<(u64, usize, usize)>> = primes
        .iter()
        .enumerate()
        .map(|(i, &p)| Reverse((p * p, i, i)))
        .collect();

    while out.len() < count {
        let Some(Reverse((product, i, j))) = heap.pop() else {
            break;
        };
        out.push(product);
        if let Some(&q) = primes.get(j + 1) {
            heap.push(Reverse((primes[i] * q, i, j + 1)));
        }
    }
    out
}

/// Products over every ordered pair, first-seen order, until `count` are found.
fn nested_products(primes: &[u64], count: usize) -> Vec<u64> {
    let mut seen: HashSet<u64> = HashSet::with_capacity(count.min(1 << 16));
    let mut out = Vec::with_capacity(count.min(1 << 16));
    if count == 0 {
        return out;
    }
    'outer: for &p in primes {
        for &q in primes {
            let product = p * q;
            if seen.insert(product) {
                out.push(product);
                if out.len() >= count {
                    break 'outer;
                }
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Kernel
// ---------------------------------------------------------------------------

/// Repeated decimal digit sum of `|value|` down to a single digit.
///
/// Unlike the textbook digital root, `kernel(0)` is 0; every positive
/// multiple of 9 still yields 9.
#[must_use]
pub fn kernel(value: i64) -> u8 {
    let mut v = value.unsigned_abs();
    while v >= 10 {
        let mut sum = 0u64;
        while v > 0 {
            sum += v % 10;
            v /= 10;
        }
        v = sum;
    }
    // v < 10 here.
    #[allow(clippy::cast_possible_truncation)]
    let digit = v as u8;
    digit
}

/// The value fed to the kernel at grid coordinate `(x, y)`.
#[inline]
#[must_use]
pub const fn kernel_argument(x: i64, y: i64) -> i64 {
    x * y - (x + y)
}

/// Check one axis range for emptiness and overflow bounds.
fn check_range(param: &str, range: CoordRange) -> Result<(), ParamError> {
    if range.is_empty() {
        return Err(ParamError::new(
            param,
            ParamErrorKind::OutOfRange {
                value: range.end,
                min: range.start.saturating_add(1),
                max: MAX_GRID_COORD,
            },
        ));
    }
    for bound in [range.start, range.end] {
        if bound.abs() > MAX_GRID_COORD {
            return Err(ParamError::new(
                param,
                ParamErrorKind::OutOfRange {
                    value: bound,
                    min: -MAX_GRID_COORD,
                    max: MAX_GRID_COORD,
                },
            ));
        }
    }
    if range.len() > MAX_GRID_SPAN {
        #[allow(clippy::cast_possible_wrap)]
        let span = range.len() as i64;
        #[allow(clippy::cast_possible_wrap)]
        let max = MAX_GRID_SPAN as i64;
        return Err(ParamError::new(
            param,
            ParamErrorKind::OutOfRange {
                value: span,
                min: 1,
                max,
            },
        ));
    }
    Ok(())
}

/// Validate a pair of grid axis ranges.
///
/// # Errors
///
/// Returns a [`ParamError`] naming `x_range` or `y_range` when an axis is
/// empty, exceeds `±MAX_GRID_COORD`, or spans more than `MAX_GRID_SPAN`.
pub fn validate_grid_ranges(x_range: CoordRange, y_range: CoordRange) -> Result<(), ParamError> {
    check_range("x_range", x_range)?;
    check_range("y_range", y_range)
}

/// Dense grid of `kernel(x*y - (x + y))` over the two ranges.
///
/// Row `r` holds `x = x_range.start + r`; column `c` holds `y = y_range.start + c`.
///
/// # Errors
///
/// See [`validate_grid_ranges`].
pub fn generate_kernel_grid(x_range: CoordRange, y_range: CoordRange) -> Result<Grid, ParamError> {
    validate_grid_ranges(x_range, y_range)?;
    let (x0, y0) = (x_range.start, y_range.start);
    let grid = Grid::from_fn(x_range.len(), y_range.len(), x0, y0, |r, c| {
        #[allow(clippy::cast_possible_wrap)]
        let (x, y) = (x0 + r as i64, y0 + c as i64);
        kernel(kernel_argument(x, y))
    });
    debug!(rows = grid.rows(), cols = grid.cols(), "generated kernel grid");
    Ok(grid)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
