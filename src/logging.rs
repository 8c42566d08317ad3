//! Installs the `tracing` subscriber that receives integrity events.
//!
//! Filter precedence (highest first): `INTACT_LOG`, the `--log-level` flag,
//! `logging.level` from the config file. Output goes to stderr unless
//! `logging.file` names a file, in which case it is appended there without
//! ANSI colors.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding a full `EnvFilter` directive string.
pub const LOG_ENV: &str = "INTACT_LOG";

/// Build the event filter.
///
/// # Errors
///
/// Returns an error if the level override or configured level is not a
/// valid filter directive.
pub fn build_filter(config: &LoggingConfig, level_override: Option<&str>) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    let level = level_override.unwrap_or(&config.level);
    EnvFilter::try_new(level).with_context(|| format!("Invalid log level: {level}"))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the filter is invalid, the log file cannot be
/// opened, or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig, level_override: Option<&str>) -> Result<()> {
    let filter = build_filter(config, level_override)?;
    let registry = tracing_subscriber::registry().with(filter);

    match &config.file {
        Some(path) => {
            let file = open_log_file(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(file),
                )
                .try_init()
                .context("Failed to install log subscriber")?;
        }
        None => {
            registry
                .with(
                    fmt::layer()
                        .with_target(false)
                        .without_time()
                        .with_ansi(config.color)
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .context("Failed to install log subscriber")?;
        }
    }

    Ok(())
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_filter_from_config() {
        unsafe { std::env::remove_var(LOG_ENV) };
        let config = LoggingConfig::default();
        let filter = build_filter(&config, None).unwrap();
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    #[serial]
    fn test_override_beats_config() {
        unsafe { std::env::remove_var(LOG_ENV) };
        let config = LoggingConfig::default();
        let filter = build_filter(&config, Some("debug")).unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    #[serial]
    fn test_env_beats_everything() {
        unsafe { std::env::set_var(LOG_ENV, "error") };
        let filter = build_filter(&LoggingConfig::default(), Some("debug"));
        unsafe { std::env::remove_var(LOG_ENV) };
        assert_eq!(filter.unwrap().to_string(), "error");
    }

    #[test]
    #[serial]
    fn test_invalid_level() {
        unsafe { std::env::remove_var(LOG_ENV) };
        let config = LoggingConfig::default();
        assert!(build_filter(&config, Some("intact=loud")).is_err());
    }

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("intact.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
