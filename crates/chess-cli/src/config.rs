//! Configuration file loading for the chess CLI.
//!
//! Settings live in `chess.toml` in the current directory unless another path
//! is given. Every field is optional; a missing default file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChessConfig {
    /// Position new games start from, as FEN. Defaults to the standard start.
    #[serde(default)]
    pub start_fen: Option<String>,
    /// Print the board after every move in `play`. Defaults to true.
    #[serde(default = "default_show_board")]
    pub show_board: bool,
    /// Log filter used when `RUST_LOG` is unset. Defaults to "warn".
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit JSON instead of text.
    #[serde(default)]
    pub json: bool,
}

fn default_show_board() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ChessConfig {
    fn default() -> Self {
        ChessConfig {
            start_fen: None,
            show_board: default_show_board(),
            log_level: default_log_level(),
            json: false,
        }
    }
}

impl ChessConfig {
    /// Loads configuration from `path`, or from [`Self::default_path`] when
    /// no path is given.
    ///
    /// A missing default file yields the defaults. An explicitly requested
    /// file has to exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config_path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !explicit && !config_path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::ReadError {
                path: config_path.clone(),
                source,
            })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }
}
