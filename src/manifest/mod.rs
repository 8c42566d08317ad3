//! Integrity manifest: the persisted list of `(path, digest)` pairs.
//!
//! A manifest is produced once by generation and afterwards only read. Entry
//! order is the directory iteration order at generation time and is kept
//! as-is through encode/decode.
//!
//! Paths are plain strings compared byte-for-byte. No normalization is
//! applied, so `dir/a` and `./dir/a` are different entries.

pub mod codec;

pub use codec::{FormatError, FormatReason, decode, decode_bytes, encode};

use crate::digest::Digest;
use crate::error::IntegrityError;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// One manifest line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Path exactly as written at generation time
    pub path: String,
    /// Expected content digest
    pub digest: Digest,
}

impl ManifestEntry {
    /// Create an entry.
    pub fn new(path: impl Into<String>, digest: Digest) -> Self {
        Self {
            path: path.into(),
            digest,
        }
    }
}

/// Ordered collection of manifest entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Create an empty manifest.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Wrap already-ordered entries.
    #[must_use]
    pub const fn from_entries(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// Append an entry.
    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    /// Entries in manifest order.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Iterate entries in manifest order.
    pub fn iter(&self) -> std::slice::Iter<'_, ManifestEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest lists no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set of listed paths, for membership checks against a live snapshot.
    #[must_use]
    pub fn paths(&self) -> HashSet<&str> {
        self.entries.iter().map(|e| e.path.as_str()).collect()
    }

    /// Render to manifest text.
    #[must_use]
    pub fn to_text(&self) -> String {
        encode(&self.entries)
    }

    /// Read and validate a manifest file.
    ///
    /// # Errors
    ///
    /// - [`IntegrityError::ManifestRead`] if the file cannot be read
    /// - [`IntegrityError::Format`] if any line is malformed
    pub fn load(path: &Path) -> Result<Self, IntegrityError> {
        let bytes = std::fs::read(path).map_err(|source| IntegrityError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(decode_bytes(&bytes)?)
    }

    /// Write the manifest to `path`, replacing any existing file.
    ///
    /// Content goes to a temporary file next to `path` which is then renamed
    /// over it, so readers never observe a half-written manifest.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrityError::WriteFailure`] if the temporary file cannot
    /// be created, written, or renamed into place.
    pub fn save(&self, path: &Path) -> Result<(), IntegrityError> {
        let write_failure = |source| IntegrityError::WriteFailure {
            path: path.to_path_buf(),
            source,
        };

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(parent).map_err(write_failure)?;
        tmp.write_all(self.to_text().as_bytes())
            .map_err(write_failure)?;
        tmp.as_file().sync_all().map_err(write_failure)?;
        tmp.persist(path).map_err(|e| write_failure(e.error))?;

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
