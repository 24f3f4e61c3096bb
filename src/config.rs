//! Conversion settings
//!
//! Controls how many decimals a computed result keeps and how ties are
//! rounded. Settings can be built in code or loaded from a TOML or JSON file:
//!
//! ```toml
//! decimal_places = 2
//! rounding = "half_even"
//! ```

use crate::conversion::RoundingMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest precision an `f64` result can meaningfully carry
pub const MAX_DECIMAL_PLACES: u32 = 15;

/// Errors raised while loading a [`ConversionConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Decimal places must be at most 15, got {0}")]
    InvalidDecimalPlaces(u32),
}

/// Validated settings. Fields are only set through the checked constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    decimal_places: u32,
    rounding: RoundingMode,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            decimal_places: 2,
            rounding: RoundingMode::HalfAwayFromZero,
        }
    }
}

impl ConversionConfig {
    pub fn new(decimal_places: u32, rounding: RoundingMode) -> Result<Self, ConfigError> {
        Self { decimal_places, rounding }.validated()
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load settings from a `.toml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        let config = parse(&fs::read_to_string(path)?)?;

        tracing::debug!(
            path = %path.display(),
            decimal_places = config.decimal_places,
            rounding = ?config.rounding,
            "loaded conversion config"
        );
        Ok(config)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::InvalidDecimalPlaces(self.decimal_places));
        }
        Ok(self)
    }
}
