use super::{Config, LOG_LEVELS};
use anyhow::{Context, Result};
use std::path::Path;

/// Read, parse and validate a TOML configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or
/// fails [`validate_config`].
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Parse and validate configuration text.
///
/// # Errors
///
/// Returns an error if the text is not valid TOML or fails [`validate_config`].
pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse TOML config")?;

    validate_config(&config)?;
    Ok(config)
}

/// Check value ranges that serde cannot express.
///
/// # Errors
///
/// Returns an error if `hashing.chunk_size` is zero or `logging.level` is
/// not one of [`LOG_LEVELS`].
pub fn validate_config(config: &Config) -> Result<()> {
    if config.hashing.chunk_size == 0 {
        anyhow::bail!("hashing.chunk_size must be at least 1");
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        anyhow::bail!(
            "Invalid log level '{}' (must be one of: {})",
            config.logging.level,
            LOG_LEVELS.join(", ")
        );
    }

    Ok(())
}
