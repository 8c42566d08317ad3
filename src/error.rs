//! Fatal errors for the generate / verify / check operations.
//!
//! Verification discrepancies are not errors; they are data in
//! [`crate::integrity::VerificationResult`]. Anything in here aborts the
//! operation that raised it.

use crate::manifest::FormatError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop an integrity operation.
#[derive(Debug, Error)]
pub enum IntegrityError {
    /// The target directory could not be opened or listed.
    #[error("cannot open directory {path}: {source}")]
    DirNotFound {
        /// Directory as given by the caller
        path: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The manifest file could not be read.
    #[error("cannot read integrity list {}: {source}", path.display())]
    ManifestRead {
        /// Manifest location
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The manifest file could not be created or written.
    #[error("cannot write integrity list {}: {source}", path.display())]
    WriteFailure {
        /// Manifest location
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The manifest is malformed.
    #[error("integrity list is malformed: {0}")]
    Format(#[from] FormatError),
}

impl IntegrityError {
    /// Format error details, if this is a malformed manifest.
    #[must_use]
    pub const fn as_format_error(&self) -> Option<&FormatError> {
        match self {
            Self::Format(e) => Some(e),
            _ => None,
        }
    }
}
