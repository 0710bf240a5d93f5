//! Transformer: stateless reshaping of a generated dataset.
//!
//! Four transforms, one enum case each:
//!
//! | Transform      | Alias    | Input    | Rule                              |
//! |----------------|----------|----------|-----------------------------------|
//! | `Mod`          | `HMM_N`  | sequence | `v mod m`                         |
//! | `Div`          | `HMM_B`  | sequence | `v / b`                           |
//! | `GridMod`      | `HMM_DN` | grid     | `cell mod m`                      |
//! | `LinearMod10`  | `HMM_R`  | grid     | `(a·row + b·col) mod 10`          |
//!
//! `LinearMod10` recolors by position only: the previous cell values are
//! discarded. Its modulo is Euclidean, so negative coefficients still
//! produce digits in `0..=9`.
//!
//! Transforms borrow their input and return a fresh dataset. Callers keep
//! the original data and re-apply transforms to it whenever the parameters
//! change, never chaining onto a previous output.

use std::fmt;

use tracing::debug;

use crate::error::{ParamError, ParamErrorKind, TransformError};
use crate::grid::Grid;
use crate::params::parse_int;

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Either of the two dataset shapes a transform can consume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dataset {
    /// An ordered 1D sequence.
    Sequence(Vec<u64>),
    /// A dense 2D grid.
    Grid(Grid),
}

impl Dataset {
    /// Human-readable shape name.
    #[must_use]
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Self::Sequence(_) => "sequence",
            Self::Grid(_) => "grid",
        }
    }
}

// ---------------------------------------------------------------------------
// TransformKind
// ---------------------------------------------------------------------------

/// The variant tag, without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Mod,
    Div,
    GridMod,
    LinearMod10,
}

impl TransformKind {
    /// Canonical name (`MOD`, `DIV`, `GRID_MOD`, `LINEAR_MOD10`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mod => "MOD",
            Self::Div => "DIV",
            Self::GridMod => "GRID_MOD",
            Self::LinearMod10 => "LINEAR_MOD10",
        }
    }

    /// Legacy model name (`HMM_N`, `HMM_B`, ...).
    #[must_use]
    pub const fn model_name(self) -> &'static str {
        match self {
            Self::Mod => "HMM_N",
            Self::Div => "HMM_B",
            Self::GridMod => "HMM_DN",
            Self::LinearMod10 => "HMM_R",
        }
    }

    /// Names of the parameters this variant takes, in order.
    #[must_use]
    pub const fn param_names(self) -> &'static [&'static str] {
        match self {
            Self::Mod | Self::GridMod => &["modulus"],
            Self::Div => &["base"],
            Self::LinearMod10 => &["a", "b"],
        }
    }

    /// Whether the variant consumes a 2D grid (otherwise a 1D sequence).
    #[must_use]
    pub const fn is_grid(self) -> bool {
        matches!(self, Self::GridMod | Self::LinearMod10)
    }

    /// All variants.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Mod, Self::Div, Self::GridMod, Self::LinearMod10]
    }

    /// Parse a variant tag (case-insensitive; `-` and `_` are equivalent).
    ///
    /// Accepts the canonical names and the legacy model names.
    ///
    /// # Errors
    ///
    /// Returns a [`ParamError`] for the `transform` parameter if the name is
    /// not recognized.
    pub fn from_name(name: &str) -> Result<Self, ParamError> {
        let key = name.trim().to_ascii_uppercase().replace('-', "_");
        if key == "LINEAR" {
            return Ok(Self::LinearMod10);
        }
        Self::all()
            .iter()
            .copied()
            .find(|k| k.name() == key || k.model_name() == key)
            .ok_or_else(|| {
                ParamError::new("transform", ParamErrorKind::UnknownName(name.to_string()))
            })
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// A transform with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    /// `v mod modulus` over a sequence.
    Mod { modulus: u64 },
    /// `v / base` over a sequence.
    Div { base: u64 },
    /// `cell mod modulus` over a grid.
    GridMod { modulus: u64 },
    /// `(a·row + b·col) mod 10` over a grid.
    LinearMod10 { a: i64, b: i64 },
}

impl Transform {
    /// The variant tag.
    #[must_use]
    pub const fn kind(self) -> TransformKind {
        match self {
            Self::Mod { .. } => TransformKind::Mod,
            Self::Div { .. } => TransformKind::Div,
            Self::GridMod { .. } => TransformKind::GridMod,
            Self::LinearMod10 { .. } => TransformKind::LinearMod10,
        }
    }

    /// Build a transform from raw user text, one string per parameter.
    ///
    /// `raw` must hold the parameters named by
    /// [`TransformKind::param_names`], in order.
    ///
    /// # Errors
    ///
    /// A [`ParamError`] naming the parameter if one is missing, not an
    /// integer, or out of its domain (zero or negative modulus/base), or
    /// naming the transform if `raw` holds more values than it takes.
    pub fn from_raw<S: AsRef<str>>(kind: TransformKind, raw: &[S]) -> Result<Self, ParamError> {
        let names = kind.param_names();
        if raw.len() > names.len() {
            return Err(ParamError::new(
                "transform",
                ParamErrorKind::TooMany {
                    transform: kind.name(),
                    expected: names.len(),
                    given: raw.len(),
                },
            ));
        }
        let mut values = [0i64; 2];
        for (i, name) in names.iter().enumerate() {
            let text = raw
                .get(i)
                .ok_or_else(|| ParamError::new(*name, ParamErrorKind::Missing))?;
            values[i] = parse_int(name, text.as_ref())?;
        }

        let transform = match kind {
            TransformKind::Mod => Self::Mod {
                modulus: positive("modulus", values[0])?,
            },
            TransformKind::Div => Self::Div {
                base: positive("base", values[0])?,
            },
            TransformKind::GridMod => Self::GridMod {
                modulus: positive("modulus", values[0])?,
            },
            TransformKind::LinearMod10 => Self::LinearMod10 {
                a: values[0],
                b: values[1],
            },
        };
        Ok(transform)
    }

    /// Reject a zero modulus or base before any arithmetic happens.
    ///
    /// # Errors
    ///
    /// Returns the division-by-zero [`ParamError`].
    pub fn validate(self) -> Result<(), ParamError> {
        match self {
            Self::Mod { modulus: 0 } | Self::GridMod { modulus: 0 } => {
                Err(ParamError::zero("modulus"))
            }
            Self::Div { base: 0 } => Err(ParamError::zero("base")),
            _ => Ok(()),
        }
    }

    /// Apply a 1D transform to a sequence.
    ///
    /// # Errors
    ///
    /// [`TransformError::ShapeMismatch`] for grid variants, or the domain
    /// error from [`validate`](Self::validate).
    pub fn apply_sequence(self, data: &[u64]) -> Result<Vec<u64>, TransformError> {
        self.validate()?;
        let out = match self {
            Self::Mod { modulus } => data.iter().map(|v| v % modulus).collect(),
            Self::Div { base } => data.iter().map(|v| v / base).collect(),
            Self::GridMod { .. } | Self::LinearMod10 { .. } => {
                return Err(self.mismatch("sequence"));
            }
        };
        debug!(transform = %self, len = data.len(), "applied sequence transform");
        Ok(out)
    }

    /// Apply a 2D transform to a grid.
    ///
    /// # Errors
    ///
    /// [`TransformError::ShapeMismatch`] for sequence variants, or the
    /// domain error from [`validate`](Self::validate).
    pub fn apply_grid(self, grid: &Grid) -> Result<Grid, TransformError> {
        self.validate()?;
        let out = match self {
            Self::GridMod { modulus } => grid.map(|_, _, v| {
                // v % modulus < v or < modulus; either fits in u8.
                #[allow(clippy::cast_possible_truncation)]
                let r = (u64::from(v) % modulus) as u8;
                r
            }),
            Self::LinearMod10 { a, b } => grid.map(|row, col, _| linear_mod10(a, b, row, col)),
            Self::Mod { .. } | Self::Div { .. } => return Err(self.mismatch("grid")),
        };
        debug!(transform = %self, rows = grid.rows(), cols = grid.cols(), "applied grid transform");
        Ok(out)
    }

    /// Apply to either dataset shape.
    ///
    /// # Errors
    ///
    /// See [`apply_sequence`](Self::apply_sequence) and
    /// [`apply_grid`](Self::apply_grid).
    pub fn apply(self, data: &Dataset) -> Result<Dataset, TransformError> {
        if self.kind().is_grid() != matches!(data, Dataset::Grid(_)) {
            return Err(self.mismatch(data.shape_name()));
        }
        match data {
            Dataset::Sequence(seq) => self.apply_sequence(seq).map(Dataset::Sequence),
            Dataset::Grid(grid) => self.apply_grid(grid).map(Dataset::Grid),
        }
    }

    const fn mismatch(self, dataset: &'static str) -> TransformError {
        TransformError::ShapeMismatch {
            transform: self.kind().name(),
            dataset,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mod { modulus } => write!(f, "MOD {modulus}"),
            Self::Div { base } => write!(f, "DIV {base}"),
            Self::GridMod { modulus } => write!(f, "GRID_MOD {modulus}"),
            Self::LinearMod10 { a, b } => write!(f, "LINEAR_MOD10 a={a} b={b}"),
        }
    }
}

/// `(a·row + b·col) mod 10`, Euclidean, computed without overflow.
#[must_use]
pub fn linear_mod10(a: i64, b: i64, row: usize, col: usize) -> u8 {
    let sum = i128::from(a) * row as i128 + i128::from(b) * col as i128;
    // rem_euclid(10) is in 0..10.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let digit = sum.rem_euclid(10) as u8;
    digit
}

/// Require a strictly positive modulus/base.
fn positive(param: &str, value: i64) -> Result<u64, ParamError> {
    match value {
        0 => Err(ParamError::zero(param)),
        v if v < 0 => Err(ParamError::new(
            param,
            ParamErrorKind::OutOfRange {
                value: v,
                min: 1,
                max: i64::MAX,
            },
        )),
        #[allow(clippy::cast_sign_loss)]
        v => Ok(v as u64),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    // ── TransformKind ───────────────────────────────────────────────────

    #[test]
    fn kind_from_canonical_and_model_names() {
        assert_eq!(TransformKind::from_name("MOD").unwrap(), TransformKind::Mod);
        assert_eq!(TransformKind::from_name("hmm_b").unwrap(), TransformKind::Div);
        assert_eq!(TransformKind::from_name("grid-mod").unwrap(), TransformKind::GridMod);
        assert_eq!(TransformKind::from_name("HMM_DN").unwrap(), TransformKind::GridMod);
        assert_eq!(
            TransformKind::from_name("linear_mod10").unwrap(),
            TransformKind::LinearMod10
        );
        assert_eq!(TransformKind::from_name("HMM_R").unwrap(), TransformKind::LinearMod10);
        assert_eq!(TransformKind::from_name(" linear ").unwrap(), TransformKind::LinearMod10);
        for &k in TransformKind::all() {
            assert_eq!(TransformKind::from_name(k.model_name()).unwrap(), k);
        }
    }

    #[test]
    fn kind_unknown_name() {
        let err = TransformKind::from_name("fft").unwrap_err();
        assert_eq!(err.param, "transform");
        assert_eq!(err.kind, ParamErrorKind::UnknownName("fft".into()));
    }

    #[test]
    fn kind_shapes() {
        assert!(!TransformKind::Mod.is_grid());
        assert!(!TransformKind::Div.is_grid());
        assert!(TransformKind::GridMod.is_grid());
        assert!(TransformKind::LinearMod10.is_grid());
    }

    // ── from_raw ────────────────────────────────────────────────────────

    #[test]
    fn from_raw_parses_parameters() {
        assert_eq!(
            Transform::from_raw(TransformKind::Mod, &["5"]).unwrap(),
            Transform::Mod { modulus: 5 }
        );
        assert_eq!(
            Transform::from_raw(TransformKind::Div, &[" 100 "]).unwrap(),
            Transform::Div { base: 100 }
        );
        assert_eq!(
            Transform::from_raw(TransformKind::LinearMod10, &["-3", "7"]).unwrap(),
            Transform::LinearMod10 { a: -3, b: 7 }
        );
    }

    #[test]
    fn from_raw_names_bad_parameter() {
        let err = Transform::from_raw(TransformKind::LinearMod10, &["1", "x"]).unwrap_err();
        assert_eq!(err.param, "b");
        assert_eq!(err.kind, ParamErrorKind::NotANumber("x".into()));
    }

    #[test]
    fn from_raw_missing_parameter() {
        let err = Transform::from_raw::<&str>(TransformKind::Div, &[]).unwrap_err();
        assert_eq!(err.param, "base");
        assert_eq!(err.kind, ParamErrorKind::Missing);
    }

    #[test]
    fn from_raw_rejects_extra_values() {
        let err = Transform::from_raw(TransformKind::Mod, &["5", "7"]).unwrap_err();
        assert_eq!(err.param, "transform");
        assert_eq!(
            err.kind,
            ParamErrorKind::TooMany {
                transform: "MOD",
                expected: 1,
                given: 2
            }
        );
        assert!(err.to_string().contains("MOD takes 1 value(s), 2 given"));
        assert!(Transform::from_raw(TransformKind::LinearMod10, &["1", "2", "3"]).is_err());
    }

    #[test]
    fn from_raw_zero_is_domain_error() {
        let err = Transform::from_raw(TransformKind::GridMod, &["0"]).unwrap_err();
        assert!(err.is_domain_error());
        assert_eq!(err.param, "modulus");
    }

    #[test]
    fn from_raw_negative_modulus_out_of_range() {
        let err = Transform::from_raw(TransformKind::Mod, &["-4"]).unwrap_err();
        assert!(matches!(err.kind, ParamErrorKind::OutOfRange { value: -4, .. }));
    }

    // ── Sequence transforms ─────────────────────────────────────────────

    #[test]
    fn mod_sequence() {
        let data = vec![4, 6, 9, 10, 14];
        let out = Transform::Mod { modulus: 5 }.apply_sequence(&data).unwrap();
        assert_eq!(out, vec![4, 1, 4, 0, 4]);
    }

    #[test]
    fn mod_one_is_all_zero() {
        let data = vec![4, 6, 9, 10, 14];
        let out = Transform::Mod { modulus: 1 }.apply_sequence(&data).unwrap();
        assert_eq!(out, vec![0; 5]);
    }

    #[test]
    fn div_sequence() {
        let data = vec![4, 6, 9, 10, 14, 250];
        let out = Transform::Div { base: 5 }.apply_sequence(&data).unwrap();
        assert_eq!(out, vec![0, 1, 1, 2, 2, 50]);
    }

    #[test]
    fn zero_modulus_and_base_fail_without_touching_input() {
        let data = vec![4, 6, 9];
        let err = Transform::Mod { modulus: 0 }.apply_sequence(&data).unwrap_err();
        assert!(matches!(err, TransformError::Param(ref p) if p.is_domain_error()));
        let err = Transform::Div { base: 0 }.apply_sequence(&data).unwrap_err();
        assert!(matches!(err, TransformError::Param(ref p) if p.param == "base"));
        assert_eq!(data, vec![4, 6, 9]);
    }

    #[test]
    fn grid_variant_on_sequence_is_mismatch() {
        let err = Transform::GridMod { modulus: 3 }.apply_sequence(&[1, 2]).unwrap_err();
        assert_eq!(
            err,
            TransformError::ShapeMismatch {
                transform: "GRID_MOD",
                dataset: "sequence"
            }
        );
    }

    // ── Grid transforms ─────────────────────────────────────────────────

    fn sample_grid() -> Grid {
        Grid::from_fn(3, 4, -1, -2, |r, c| u8::try_from((r * 4 + c) % 10).unwrap())
    }

    #[test]
    fn grid_mod_preserves_shape_and_origin() {
        let g = sample_grid();
        let out = Transform::GridMod { modulus: 3 }.apply_grid(&g).unwrap();
        assert_eq!(out.shape(), g.shape());
        assert_eq!((out.x_start(), out.y_start()), (-1, -2));
        for (r, c, v) in g.iter() {
            assert_eq!(out.get(r, c), Some(v % 3));
        }
    }

    #[test]
    fn grid_mod_larger_than_digits_is_identity() {
        let g = sample_grid();
        let out = Transform::GridMod { modulus: 1000 }.apply_grid(&g).unwrap();
        assert_eq!(out, g);
    }

    #[test]
    fn linear_mod10_uses_position_only() {
        let g = sample_grid();
        let out = Transform::LinearMod10 { a: 10, b: 5 }.apply_grid(&g).unwrap();
        // a = 10 vanishes mod 10; columns alternate 0, 5.
        assert_eq!(out.row(0), Some(&[0, 5, 0, 5][..]));
        assert_eq!(out.row(2), Some(&[0, 5, 0, 5][..]));
    }

    #[test]
    fn linear_mod10_negative_coefficients_stay_digits() {
        assert_eq!(linear_mod10(-1, 0, 1, 0), 9);
        assert_eq!(linear_mod10(-3, -4, 2, 3), 2); // -18 mod 10
        assert_eq!(linear_mod10(i64::MIN, i64::MAX, 7, 9), {
            let s = i128::from(i64::MIN) * 7 + i128::from(i64::MAX) * 9;
            u8::try_from(s.rem_euclid(10)).unwrap()
        });
    }

    #[test]
    fn sequence_variant_on_grid_is_mismatch() {
        let err = Transform::Div { base: 2 }.apply_grid(&sample_grid()).unwrap_err();
        assert!(matches!(err, TransformError::ShapeMismatch { dataset: "grid", .. }));
    }

    #[test]
    fn apply_dispatches_on_dataset() {
        let seq = Dataset::Sequence(vec![10, 11]);
        assert_eq!(
            Transform::Mod { modulus: 10 }.apply(&seq).unwrap(),
            Dataset::Sequence(vec![0, 1])
        );
        let grid = Dataset::Grid(sample_grid());
        let err = Transform::Mod { modulus: 10 }.apply(&grid).unwrap_err();
        assert_eq!(
            err,
            TransformError::ShapeMismatch {
                transform: "MOD",
                dataset: "grid"
            }
        );
        let err = Transform::GridMod { modulus: 3 }.apply(&seq).unwrap_err();
        assert!(err.to_string().contains("GRID_MOD cannot be applied to a sequence"));
    }

    #[test]
    fn display() {
        assert_eq!(Transform::Mod { modulus: 5 }.to_string(), "MOD 5");
        assert_eq!(
            Transform::LinearMod10 { a: 1, b: -2 }.to_string(),
            "LINEAR_MOD10 a=1 b=-2"
        );
    }

    // ── Properties ──────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_mod_bounded(
            data in proptest::collection::vec(any::<u64>(), 0..64),
            m in 1u64..1000,
        ) {
            let out = Transform::Mod { modulus: m }.apply_sequence(&data).unwrap();
            prop_assert_eq!(out.len(), data.len());
            prop_assert!(out.iter().all(|&r| r < m));
        }

        #[test]
        fn prop_linear_ignores_cell_values(
            rows in 1usize..12,
            cols in 1usize..12,
            seed_a in 0u8..10,
            seed_b in 0u8..10,
            a in -100i64..100,
            b in -100i64..100,
        ) {
            let g1 = Grid::from_fn(rows, cols, 0, 0, |_, _| seed_a);
            let g2 = Grid::from_fn(rows, cols, 0, 0, |r, c| (seed_b + u8::try_from((r + c) % 10).unwrap()) % 10);
            let t = Transform::LinearMod10 { a, b };
            prop_assert_eq!(t.apply_grid(&g1).unwrap(), t.apply_grid(&g2).unwrap());
        }
    }
}
