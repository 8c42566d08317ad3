pub mod parser;
pub mod validator;

use crate::digest::DEFAULT_CHUNK_SIZE;
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "INTACT_CONFIG";

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Settings read from `config.toml`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// `[hashing]` section
    #[serde(default)]
    pub hashing: HashingConfig,

    /// `[logging]` section
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Digest engine settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HashingConfig {
    /// Bytes read per chunk when streaming a file through the hasher
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

/// Log subscriber settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Append log output to this file instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Colored output (stderr only)
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            color: default_color(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// A missing file yields the defaults; nothing is written to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file contains invalid TOML
    /// - A value is out of range (see [`parser::validate_config`])
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        parser::parse_config_file(path)
    }
}

/// Resolve which configuration file to read.
///
/// Precedence: explicit path (command line), `INTACT_CONFIG`, then
/// `<config dir>/intact/config.toml`. Returns `None` when no config
/// directory can be determined and nothing was given explicitly.
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|dir| dir.join("intact").join("config.toml"))
}

// Default functions for serde
const fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_color() -> bool {
    true
}
