//! Directory snapshot: the regular files directly inside one directory.
//!
//! Only depth-one entries are considered. Entry types come from the
//! directory listing itself (walkdir falls back to `lstat` when the platform
//! does not report a type), and symlinks are never followed, so a symlink to
//! a regular file is excluded just like a subdirectory or device node.

use crate::error::IntegrityError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regular files found under a directory at one point in time.
#[derive(Debug, Clone, Default)]
pub struct DirectorySnapshot {
    /// `<dir>/<name>` for every regular file, in iteration order
    files: Vec<String>,
    /// Regular files whose names are not valid UTF-8
    unrepresentable: Vec<PathBuf>,
    /// Entries that could not be read or classified
    unreadable: Vec<UnreadableEntry>,
}

/// A directory entry the listing could not inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableEntry {
    /// Entry path, or the directory itself when the entry has no path
    pub path: PathBuf,
    /// Error reported by the listing
    pub reason: String,
}

impl DirectorySnapshot {
    /// Paths of the regular files, in directory iteration order.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Regular files that cannot be written to a UTF-8 manifest.
    #[must_use]
    pub fn unrepresentable(&self) -> &[PathBuf] {
        &self.unrepresentable
    }

    /// Entries skipped because they could not be read or classified.
    /// Such an entry may be a regular file, so callers must surface these.
    #[must_use]
    pub fn unreadable(&self) -> &[UnreadableEntry] {
        &self.unreadable
    }

    /// Record an entry that could not be inspected.
    pub fn record_unreadable(&mut self, path: PathBuf, reason: impl Into<String>) {
        self.unreadable.push(UnreadableEntry {
            path,
            reason: reason.into(),
        });
    }

    /// Number of representable files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no representable files were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether `path` is one of the snapshot's files.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.files.iter().any(|f| f == path)
    }
}

/// Join a directory argument and an entry name the same way every time.
///
/// The directory string is used verbatim, so whatever spelling the caller
/// used at generation time must be reused at verification time.
#[must_use]
pub fn join_entry(dir_path: &str, name: &str) -> String {
    format!("{dir_path}/{name}")
}

/// List the regular files directly under `dir_path`.
///
/// # Errors
///
/// Returns [`IntegrityError::DirNotFound`] if `dir_path` is not a directory
/// or cannot be listed.
pub fn list_regular_files(dir_path: &str) -> Result<DirectorySnapshot, IntegrityError> {
    let dir_not_found = |source| IntegrityError::DirNotFound {
        path: dir_path.to_string(),
        source,
    };

    let metadata = std::fs::metadata(dir_path).map_err(dir_not_found)?;
    if !metadata.is_dir() {
        return Err(dir_not_found(std::io::Error::new(
            std::io::ErrorKind::NotADirectory,
            "not a directory",
        )));
    }

    let mut snapshot = DirectorySnapshot::default();

    for entry in WalkDir::new(dir_path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = match entry {
            Ok(entry) => entry,
            // Depth zero means the directory itself could not be read.
            Err(e) if e.depth() == 0 => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory listing failed"));
                return Err(dir_not_found(source));
            }
            Err(e) => {
                let path = e
                    .path()
                    .map_or_else(|| Path::new(dir_path).to_path_buf(), Path::to_path_buf);
                snapshot.record_unreadable(path, e.to_string());
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.file_name().to_str() {
            Some(name) => snapshot.files.push(join_entry(dir_path, name)),
            None => snapshot.unrepresentable.push(entry.into_path()),
        }
    }

    Ok(snapshot)
}
