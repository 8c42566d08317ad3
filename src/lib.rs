#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)] // Entry counters cannot overflow

//! # Intact - Directory Integrity Checker
//!
//! Intact records a SHA-256 digest for every regular file directly inside a
//! directory, writes them to a plain-text integrity list, and later reports
//! how the directory has drifted from that list: files whose content
//! changed, files that disappeared, and files that were added.
//!
//! ## Architecture
//!
//! - [`digest`]: streaming SHA-256 of a file
//! - [`manifest`]: the integrity list type and its line codec
//! - [`scanner`]: lists the regular files in a directory
//! - [`integrity`]: generate / verify / check, reporting through an event sink
//! - [`events`]: the event sink capability and its implementations
//! - [`config`]: TOML configuration parsing and validation
//! - [`logging`]: `tracing` subscriber installation
//! - [`commands`]: command implementations used by the binary
//! - [`output`]: terminal output
//!
//! ## Example Usage
//!
//! ```no_run
//! use intact::events::RecordingSink;
//! use intact::integrity::IntegrityCoordinator;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut coordinator = IntegrityCoordinator::new(RecordingSink::new());
//!
//! coordinator.generate("/srv/data", Path::new("/var/lib/intact/data.list"))?;
//! let result = coordinator.verify("/srv/data", Path::new("/var/lib/intact/data.list"))?;
//!
//! for discrepancy in result.discrepancies() {
//!     println!("{discrepancy}");
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Command implementations: generate, verify, check.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// SHA-256 digests of files and byte streams.
pub mod digest;

/// Fatal error taxonomy.
pub mod error;

/// Structured events emitted by integrity operations.
pub mod events;

/// Integrity coordinator and its results.
pub mod integrity;

/// Log subscriber setup.
pub mod logging;

/// Integrity list type, file I/O and line codec.
pub mod manifest;

/// Output formatting.
pub mod output;

/// Directory listing.
pub mod scanner;

use anyhow::Result;
use config::Config;
use events::TracingSink;
use integrity::IntegrityCoordinator;
use std::path::{Path, PathBuf};

/// Current version of the intact binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings shared by every command.
///
/// # Examples
///
/// ```no_run
/// use intact::IntactContext;
/// use intact::config::Config;
///
/// # fn main() -> anyhow::Result<()> {
/// // Resolve the config file the usual way
/// let ctx = IntactContext::new(None)?;
///
/// // Or supply the configuration directly (for testing)
/// let ctx = IntactContext::new_explicit(Config::default());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IntactContext {
    /// Configuration file that was consulted, if any.
    pub config_path: Option<PathBuf>,

    /// Loaded configuration settings.
    pub config: Config,
}

impl IntactContext {
    /// Creates a new `IntactContext`, loading configuration from
    /// `explicit_config`, `INTACT_CONFIG`, or the default location.
    ///
    /// # Errors
    /// Returns an error if the configuration file exists but cannot be read,
    /// parsed, or validated.
    pub fn new(explicit_config: Option<&Path>) -> Result<Self> {
        let config_path = config::resolve_config_path(explicit_config);

        let config = match &config_path {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(path) = &config_path {
            let validator = config::validator::ConfigValidator::new();
            if let Err(e) = validator.validate_config_file(path) {
                output::warning(&format!("Warning: Configuration validation failed: {e}"));
            }
        }

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Creates a new `IntactContext` from an already built configuration.
    #[must_use]
    pub const fn new_explicit(config: Config) -> Self {
        Self {
            config_path: None,
            config,
        }
    }

    /// A coordinator that reports through `tracing`, using the configured
    /// chunk size.
    #[must_use]
    pub fn coordinator(&self) -> IntegrityCoordinator<TracingSink> {
        IntegrityCoordinator::new(TracingSink).with_chunk_size(self.config.hashing.chunk_size)
    }
}
