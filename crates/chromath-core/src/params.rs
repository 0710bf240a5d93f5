//! Parameter parsing for user-supplied text.
//!
//! Everything a user types (a modulus, a coefficient, a coordinate range)
//! passes through here before it reaches the generator or transformer.
//! Failures carry the parameter name so the caller can re-prompt for
//! exactly that field.
//!
//! # Accepted syntax
//!
//! | Input       | Parser              | Example    |
//! |-------------|---------------------|------------|
//! | integer     | [`parse_int`]       | `-12`      |
//! | bounded int | [`parse_bounded`]   | `5` in 1..=200 |
//! | count       | [`parse_count`]     | `1000`     |
//! | range       | [`parse_range`]     | `-50..50`  |
//!
//! Surrounding whitespace is ignored; a leading `+` is accepted.

use crate::error::{ParamError, ParamErrorKind};
use crate::grid::CoordRange;

/// Parse a signed integer.
///
/// # Errors
///
/// `Missing` for blank input, `NotANumber` otherwise.
pub fn parse_int(param: &str, raw: &str) -> Result<i64, ParamError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ParamError::new(param, ParamErrorKind::Missing));
    }
    text.parse::<i64>()
        .map_err(|_| ParamError::new(param, ParamErrorKind::NotANumber(text.to_string())))
}

/// Parse an integer and require `min <= value <= max`.
///
/// # Errors
///
/// Anything [`parse_int`] rejects, plus `OutOfRange`.
pub fn parse_bounded(param: &str, raw: &str, min: i64, max: i64) -> Result<i64, ParamError> {
    let value = parse_int(param, raw)?;
    check_bounds(param, value, min, max)
}

/// Require `min <= value <= max` for an already-parsed value.
///
/// # Errors
///
/// `OutOfRange` naming `param`.
pub fn check_bounds(param: &str, value: i64, min: i64, max: i64) -> Result<i64, ParamError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ParamError::new(
            param,
            ParamErrorKind::OutOfRange { value, min, max },
        ))
    }
}

/// Parse a non-negative count.
///
/// # Errors
///
/// Anything [`parse_int`] rejects, or `OutOfRange` for negative input.
pub fn parse_count(param: &str, raw: &str) -> Result<usize, ParamError> {
    let value = parse_bounded(param, raw, 0, i64::MAX)?;
    usize::try_from(value).map_err(|_| {
        ParamError::new(
            param,
            ParamErrorKind::OutOfRange {
                value,
                min: 0,
                max: i64::MAX,
            },
        )
    })
}

/// Parse a half-open range written `start..end`.
///
/// Only the syntax is checked here. Emptiness and magnitude limits are the
/// generator's concern.
///
/// # Errors
///
/// `Missing` when either side is blank, `NotANumber` when the `..`
/// separator is absent or a side is not an integer.
pub fn parse_range(param: &str, raw: &str) -> Result<CoordRange, ParamError> {
    let text = raw.trim();
    let Some((start, end)) = text.split_once("..") else {
        return Err(ParamError::new(
            param,
            ParamErrorKind::NotANumber(text.to_string()),
        ));
    };
    let start = parse_int(param, start)?;
    let end = parse_int(param, end)?;
    Ok(CoordRange::new(start, end))
}
