//! Configuration file loading for the terminal driver.
//!
//! Settings live in a TOML file (`chess.toml` by default). Every field has a
//! default, and a missing file simply yields the default configuration.

use chess_engine::PromotionPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How promotions are resolved, as spelled in the config file.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Promotion {
    /// Pawns always become queens.
    #[default]
    AutoQueen,
    /// The player may append a piece letter, e.g. `e7e8n`.
    Choice,
}

impl From<Promotion> for PromotionPolicy {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::AutoQueen => PromotionPolicy::AutoQueen,
            Promotion::Choice => PromotionPolicy::Choice,
        }
    }
}

/// Rule options.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct RulesConfig {
    #[serde(default)]
    pub promotion: Promotion,
}

/// Board rendering options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Print rank numbers and file letters around the board.
    /// Defaults to true.
    #[serde(default = "default_coordinates")]
    pub coordinates: bool,
}

fn default_coordinates() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            coordinates: default_coordinates(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ChessConfig {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl ChessConfig {
    /// Default location of the configuration file.
    pub const DEFAULT_PATH: &'static str = "chess.toml";

    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            tracing::debug!("no config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }
}
