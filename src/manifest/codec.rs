//! Line-oriented manifest text format.
//!
//! Each entry is one line: `<path> <64 hex chars>\n`. Paths are written
//! verbatim with no escaping, so a path containing whitespace produces a
//! line that [`decode`] rejects.

use super::{Manifest, ManifestEntry};
use crate::digest::Digest;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Why a manifest line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatReason {
    /// Line has no tokens at all (empty or whitespace only)
    MissingPath,
    /// Line has a path but no hash
    MissingHash,
    /// Line has more than two tokens
    ExtraData,
    /// Hash token is not exactly 64 hex characters
    InvalidHash,
    /// Path already appeared on an earlier line
    DuplicatePath {
        /// 1-indexed line of the first occurrence
        first_line: usize,
    },
    /// Line contains bytes that are not valid UTF-8
    InvalidEncoding,
}

impl fmt::Display for FormatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPath => f.write_str("missing file path"),
            Self::MissingHash => f.write_str("missing hash"),
            Self::ExtraData => f.write_str("extra data after hash"),
            Self::InvalidHash => f.write_str("invalid hash format"),
            Self::DuplicatePath { first_line } => {
                write!(f, "duplicate path (first listed at line {first_line})")
            }
            Self::InvalidEncoding => f.write_str("invalid UTF-8"),
        }
    }
}

/// A malformed manifest line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("format error at line {line}: {reason}")]
pub struct FormatError {
    /// 1-indexed line number
    pub line: usize,
    /// What was wrong with it
    pub reason: FormatReason,
}

impl FormatError {
    const fn new(line: usize, reason: FormatReason) -> Self {
        Self { line, reason }
    }
}

/// Render entries in input order, one newline-terminated line each.
#[must_use]
pub fn encode(entries: &[ManifestEntry]) -> String {
    let mut out = String::with_capacity(entries.len() * (Digest::HEX_LEN + 32));
    for entry in entries {
        out.push_str(&entry.path);
        out.push(' ');
        out.push_str(&entry.digest.to_hex());
        out.push('\n');
    }
    out
}

/// Parse and validate manifest text.
///
/// Lines are split the way [`str::lines`] splits them, so a final newline
/// does not introduce an empty trailing line and `\r\n` endings are accepted.
/// Tokens are separated by runs of spaces or tabs.
///
/// # Errors
///
/// Returns the first [`FormatError`] encountered; nothing is returned for a
/// partially valid manifest.
pub fn decode(text: &str) -> Result<Manifest, FormatError> {
    let mut entries = Vec::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (idx, line) in text.lines().enumerate() {
        let line_number = idx + 1;
        let (path, hash) = split_line(line).map_err(|r| FormatError::new(line_number, r))?;

        if hash.len() != Digest::HEX_LEN {
            return Err(FormatError::new(line_number, FormatReason::InvalidHash));
        }
        let digest = Digest::from_hex(hash)
            .map_err(|_| FormatError::new(line_number, FormatReason::InvalidHash))?;

        if let Some(&first_line) = first_seen.get(path) {
            return Err(FormatError::new(
                line_number,
                FormatReason::DuplicatePath { first_line },
            ));
        }
        first_seen.insert(path, line_number);

        entries.push(ManifestEntry::new(path, digest));
    }

    Ok(Manifest::from_entries(entries))
}

/// Decode raw manifest bytes, reporting invalid UTF-8 against its line.
///
/// # Errors
///
/// [`FormatReason::InvalidEncoding`] for non UTF-8 input, otherwise whatever
/// [`decode`] reports.
pub fn decode_bytes(bytes: &[u8]) -> Result<Manifest, FormatError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => decode(text),
        Err(e) => {
            let valid = &bytes[..e.valid_up_to()];
            let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
            // An earlier line may already be malformed; report that first.
            let prefix_end = valid.iter().rposition(|&b| b == b'\n').map_or(0, |p| p + 1);
            if let Ok(prefix) = std::str::from_utf8(&bytes[..prefix_end]) {
                decode(prefix)?;
            }
            Err(FormatError::new(line, FormatReason::InvalidEncoding))
        }
    }
}

fn split_line(line: &str) -> Result<(&str, &str), FormatReason> {
    let mut tokens = line.split([' ', '\t']).filter(|t| !t.is_empty());

    let path = tokens.next().ok_or(FormatReason::MissingPath)?;
    let hash = tokens.next().ok_or(FormatReason::MissingHash)?;
    if tokens.next().is_some() {
        return Err(FormatReason::ExtraData);
    }
    Ok((path, hash))
}
