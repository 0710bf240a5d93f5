//! Configuration loaded from `chromath.toml`.
//!
//! Every key is optional; a missing file or an empty document yields the
//! defaults, which match the constants of the generator. Unknown keys are
//! rejected so typos surface instead of silently falling back.
//!
//! ```toml
//! [generate]
//! count = 1000
//! prime_limit = 10000
//! pairing = "triangular"
//! x_start = -50
//! x_end = 50
//! y_start = -50
//! y_end = 50
//!
//! [store]
//! dir = "data"
//!
//! [render]
//! palette = "flat"
//! color = "auto"
//! bins = 20
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ParamError, ParamErrorKind};
use crate::generator::{
    validate_grid_ranges, Pairing, SemiprimeOptions, DEFAULT_COUNT, DEFAULT_GRID_RANGE,
    DEFAULT_PRIME_LIMIT, MAX_PRIME_LIMIT,
};
use crate::grid::CoordRange;
use crate::params::check_bounds;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "chromath.toml";

/// Default store directory.
pub const DEFAULT_STORE_DIR: &str = "data";

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 20;

/// Upper bound on histogram bins.
pub const MAX_BINS: usize = 200;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// `[generate]`: what `chromath generate` produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    pub count: usize,
    pub prime_limit: u64,
    pub pairing: Pairing,
    pub x_start: i64,
    pub x_end: i64,
    pub y_start: i64,
    pub y_end: i64,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            prime_limit: DEFAULT_PRIME_LIMIT,
            pairing: Pairing::default(),
            x_start: DEFAULT_GRID_RANGE.start,
            x_end: DEFAULT_GRID_RANGE.end,
            y_start: DEFAULT_GRID_RANGE.start,
            y_end: DEFAULT_GRID_RANGE.end,
        }
    }
}

impl GenerateConfig {
    #[must_use]
    pub const fn x_range(&self) -> CoordRange {
        CoordRange::new(self.x_start, self.x_end)
    }

    #[must_use]
    pub const fn y_range(&self) -> CoordRange {
        CoordRange::new(self.y_start, self.y_end)
    }

    pub const fn set_x_range(&mut self, range: CoordRange) {
        self.x_start = range.start;
        self.x_end = range.end;
    }

    pub const fn set_y_range(&mut self, range: CoordRange) {
        self.y_start = range.start;
        self.y_end = range.end;
    }

    /// Options for the semiprime generator.
    #[must_use]
    pub const fn semiprime_options(&self) -> SemiprimeOptions {
        SemiprimeOptions {
            prime_limit: self.prime_limit,
            pairing: self.pairing,
        }
    }
}

/// `[store]`: where generated data lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_STORE_DIR),
        }
    }
}

/// Requested color depth for rendered frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Truecolor on a TTY, plain text otherwise.
    #[default]
    Auto,
    Truecolor,
    #[serde(rename = "256")]
    Ansi256,
    #[serde(rename = "16")]
    Ansi16,
    None,
}

impl ColorChoice {
    /// Parse a choice name as accepted on the command line.
    ///
    /// # Errors
    ///
    /// `UnknownName` for anything else.
    pub fn from_name(name: &str) -> Result<Self, ParamError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "truecolor" | "24bit" | "rgb" => Ok(Self::Truecolor),
            "256" | "ansi256" => Ok(Self::Ansi256),
            "16" | "ansi16" => Ok(Self::Ansi16),
            "none" | "off" | "plain" => Ok(Self::None),
            _ => Err(ParamError::new(
                "color",
                ParamErrorKind::UnknownName(name.to_string()),
            )),
        }
    }
}

/// `[render]`: presentation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub palette: String,
    pub color: ColorChoice,
    pub bins: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: "flat".to_string(),
            color: ColorChoice::Auto,
            bins: DEFAULT_BINS,
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// The whole configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub generate: GenerateConfig,
    pub store: StoreConfig,
    pub render: RenderConfig,
}

impl Config {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys,
    /// [`ConfigError::Invalid`] for values outside their domain.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml`](Self::from_toml).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load `path` if given, else `./chromath.toml` if it exists, else the
    /// defaults.
    ///
    /// # Errors
    ///
    /// As [`load_from_file`](Self::load_from_file). A missing default file
    /// is not an error; a missing explicit path is.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            Self::load_from_file(default)
        } else {
            debug!("no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Check every value against its domain.
    ///
    /// Called after loading and again after command-line overrides.
    ///
    /// # Errors
    ///
    /// The first offending key as a [`ParamError`].
    pub fn validate(&self) -> Result<(), ParamError> {
        let g = &self.generate;
        if g.count == 0 {
            return Err(ParamError::new(
                "count",
                ParamErrorKind::OutOfRange {
                    value: 0,
                    min: 1,
                    max: i64::MAX,
                },
            ));
        }
        let prime_limit = i64::try_from(g.prime_limit).unwrap_or(i64::MAX);
        #[allow(clippy::cast_possible_wrap)]
        check_bounds("prime_limit", prime_limit, 3, MAX_PRIME_LIMIT as i64)?;
        validate_grid_ranges(g.x_range(), g.y_range())?;

        let bins = i64::try_from(self.render.bins).unwrap_or(i64::MAX);
        #[allow(clippy::cast_possible_wrap)]
        check_bounds("bins", bins, 1, MAX_BINS as i64)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
