//! Command-line interface definitions for intact.
//!
//! The definitions are shared between the main binary and xtask (man page
//! generation). Exactly one mode flag is accepted per invocation.
//!
//! Note: Field-level documentation doubles as clap help text, so
//! missing_docs is allowed for this module.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::{ArgGroup, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for intact.
#[derive(Parser, Debug)]
#[command(
    name = "intact",
    version = crate::VERSION,
    about = "Directory integrity checker",
    long_about = "Records SHA-256 digests of the regular files in a directory and \
                  later reports files that were modified, deleted or added",
    group(
        ArgGroup::new("mode")
            .required(true)
            .args(["generate", "verify", "check", "completions"])
    )
)]
pub struct Cli {
    /// Generate an integrity list for DIRECTORY_PATH and write it to LIST_PATH
    #[arg(short, long, requires_all = ["directory", "list"])]
    pub generate: bool,

    /// Verify DIRECTORY_PATH against the integrity list at LIST_PATH
    #[arg(short, long, requires_all = ["directory", "list"])]
    pub verify: bool,

    /// Check that an integrity list is well-formed
    #[arg(short, long, value_name = "LIST_PATH", conflicts_with_all = ["directory", "list"])]
    pub check: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", conflicts_with_all = ["directory", "list"])]
    pub completions: Option<Shell>,

    /// Directory whose top-level regular files are checked
    #[arg(value_name = "DIRECTORY_PATH")]
    pub directory: Option<String>,

    /// Integrity list file
    #[arg(value_name = "LIST_PATH")]
    pub list: Option<PathBuf>,

    /// Configuration file (default: $INTACT_CONFIG or <config dir>/intact/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter level: trace, debug, info, warn, error, off
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Only print the verdict, warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// The operation selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// `-g DIRECTORY_PATH LIST_PATH`
    Generate { directory: String, list: PathBuf },
    /// `-v DIRECTORY_PATH LIST_PATH`
    Verify { directory: String, list: PathBuf },
    /// `-c LIST_PATH`
    Check { list: PathBuf },
    /// `--completions SHELL`
    Completions(Shell),
}

impl Cli {
    /// The selected mode, or `None` if the arguments do not name one
    /// (cannot happen for arguments accepted by the parser).
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        if let Some(shell) = self.completions {
            return Some(Mode::Completions(shell));
        }
        if let Some(list) = &self.check {
            return Some(Mode::Check { list: list.clone() });
        }

        let directory = self.directory.clone()?;
        let list = self.list.clone()?;
        if self.generate {
            Some(Mode::Generate { directory, list })
        } else if self.verify {
            Some(Mode::Verify { directory, list })
        } else {
            None
        }
    }
}
