//! Digest engine: streams file content through SHA-256.
//!
//! A [`Digest`] is always 32 bytes and always rendered as 64 lowercase hex
//! characters. Parsing accepts either case so that manifests edited by hand
//! (or produced by tools that emit uppercase hex) still compare correctly.

use sha2::{Digest as _, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default read size used when streaming a file through the hasher.
pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;

/// SHA-256 of the empty input.
pub const EMPTY_DIGEST_HEX: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Errors produced while hashing a single file.
#[derive(Debug, Error)]
pub enum DigestError {
    /// The file could not be opened (absent, permission denied, ...).
    #[error("cannot open {}: {source}", path.display())]
    NotFound {
        /// File that could not be opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The file was opened but a read failed part way through.
    #[error("read failed for {}: {source}", path.display())]
    ReadFailure {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl DigestError {
    /// Path of the file that failed to hash.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. } | Self::ReadFailure { path, .. } => path,
        }
    }
}

/// Fixed-length SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; Digest::LEN]);

impl Digest {
    /// Digest length in bytes.
    pub const LEN: usize = 32;

    /// Length of the hex rendering.
    pub const HEX_LEN: usize = Self::LEN * 2;

    /// Wrap raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Lowercase hex rendering (always [`Self::HEX_LEN`] characters).
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a hex string of exactly [`Self::HEX_LEN`] characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the string has the wrong length or contains a
    /// character outside `[0-9a-fA-F]`.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl FromStr for Digest {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

/// Hash an in-memory buffer.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> Digest {
    Digest(Sha256::digest(data).into())
}

/// Stream `reader` through SHA-256 using reads of at most `chunk_size` bytes.
///
/// A `chunk_size` of zero is treated as one byte.
///
/// # Errors
///
/// Returns the first non-interrupted read error; no partial digest is
/// produced in that case.
pub fn hash_reader<R: Read>(mut reader: R, chunk_size: usize) -> io::Result<Digest> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; chunk_size.max(1)];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(Digest(hasher.finalize().into()))
}

/// Hash a file with the default chunk size.
///
/// # Errors
///
/// See [`hash_file_chunked`].
pub fn hash_file(path: &Path) -> Result<Digest, DigestError> {
    hash_file_chunked(path, DEFAULT_CHUNK_SIZE)
}

/// Hash a file, reading it `chunk_size` bytes at a time.
///
/// The file handle lives only for the duration of this call.
///
/// # Errors
///
/// - [`DigestError::NotFound`] if the file cannot be opened
/// - [`DigestError::ReadFailure`] if a read fails mid-stream
pub fn hash_file_chunked(path: &Path, chunk_size: usize) -> Result<Digest, DigestError> {
    let file = File::open(path).map_err(|source| DigestError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    hash_reader(file, chunk_size).map_err(|source| DigestError::ReadFailure {
        path: path.to_path_buf(),
        source,
    })
}
