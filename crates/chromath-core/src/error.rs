//! Error taxonomy for the numeric core.
//!
//! Every error here is recoverable: the caller re-prompts for a parameter,
//! regenerates missing data, or fixes a config file. Nothing in the core
//! leaves stored state half-written on failure.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Parameter errors
// ---------------------------------------------------------------------------

/// Why a user-supplied parameter was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamErrorKind {
    /// The text could not be parsed as an integer.
    NotANumber(String),

    /// The parameter was required but not supplied.
    Missing,

    /// Zero modulus or base (division or modulo by zero).
    Zero,

    /// The value lies outside the accepted interval.
    OutOfRange { value: i64, min: i64, max: i64 },

    /// More values than the transform takes.
    TooMany {
        transform: &'static str,
        expected: usize,
        given: usize,
    },

    /// A name (transform, pairing, view) that is not recognized.
    UnknownName(String),
}

impl fmt::Display for ParamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(text) => write!(f, "'{text}' is not an integer"),
            Self::Missing => f.write_str("value is required"),
            Self::Zero => f.write_str("must not be zero (division by zero)"),
            Self::OutOfRange { value, min, max } => {
                write!(f, "{value} is outside {min}..={max}")
            }
            Self::TooMany {
                transform,
                expected,
                given,
            } => write!(f, "{transform} takes {expected} value(s), {given} given"),
            Self::UnknownName(name) => write!(f, "unknown name '{name}'"),
        }
    }
}

/// An invalid parameter, naming which parameter failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid parameter `{param}`: {kind}")]
pub struct ParamError {
    /// Parameter name as the user sees it (`modulus`, `base`, `a`, `count`...).
    pub param: String,
    /// The reason it was rejected.
    pub kind: ParamErrorKind,
}

impl ParamError {
    #[must_use]
    pub fn new(param: impl Into<String>, kind: ParamErrorKind) -> Self {
        Self {
            param: param.into(),
            kind,
        }
    }

    /// Shorthand for a zero modulus/base.
    #[must_use]
    pub fn zero(param: impl Into<String>) -> Self {
        Self::new(param, ParamErrorKind::Zero)
    }

    /// Whether this is the division-by-zero domain error.
    #[must_use]
    pub const fn is_domain_error(&self) -> bool {
        matches!(self.kind, ParamErrorKind::Zero)
    }
}

// ---------------------------------------------------------------------------
// Transform errors
// ---------------------------------------------------------------------------

/// Failure to apply a transform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error(transparent)]
    Param(#[from] ParamError),

    #[error("transform {transform} cannot be applied to a {dataset}")]
    ShapeMismatch {
        transform: &'static str,
        dataset: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no stored {0} found; run `chromath generate` first")]
    Missing(&'static str),

    #[error("stored {dataset} is corrupt: {reason}")]
    Corrupt {
        dataset: &'static str,
        reason: String,
    },

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] ParamError),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
