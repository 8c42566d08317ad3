//! Integrity coordinator: generate and verify manifests for a directory.
//!
//! # Generation
//!
//! 1. Snapshot the directory (fatal if it cannot be listed)
//! 2. Hash each regular file; files that fail to hash are skipped with a
//!    warning event
//! 3. Encode the hashed entries and write them over the manifest path
//!
//! # Verification
//!
//! 1. Read and fully validate the manifest; a malformed manifest aborts
//!    before any file is checked
//! 2. Re-hash every listed path in manifest order, recording
//!    [`Discrepancy::FileMissing`] or [`Discrepancy::HashMismatch`]
//! 3. Snapshot the directory and record [`Discrepancy::UnexpectedFile`] for
//!    every live path the manifest does not list
//!
//! The two passes iterate disjoint path sets (listed vs. live-but-unlisted),
//! so a path is never reported twice. Everything is collected; verification
//! never stops at the first discrepancy.

pub mod report;

pub use report::{Discrepancy, GenerateReport, SkippedFile, Status, VerificationResult};

use crate::digest::{self, DEFAULT_CHUNK_SIZE, Digest, DigestError};
use crate::error::IntegrityError;
use crate::events::{Event, EventLevel, EventSink, Operation};
use crate::manifest::{Manifest, ManifestEntry};
use crate::scanner::{self, DirectorySnapshot};
use std::path::Path;

/// Runs generate / verify / check, reporting progress to an [`EventSink`].
#[derive(Debug)]
pub struct IntegrityCoordinator<S: EventSink> {
    /// Where events go
    sink: S,
    /// Read size for the digest engine
    chunk_size: usize,
}

impl<S: EventSink> IntegrityCoordinator<S> {
    /// Create a coordinator with the default hashing chunk size.
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Use `chunk_size` bytes per read when hashing (minimum one byte).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// The event sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the coordinator and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Hash every regular file in `dir_path` and write the manifest.
    ///
    /// # Errors
    ///
    /// - [`IntegrityError::DirNotFound`] if the directory cannot be listed
    /// - [`IntegrityError::WriteFailure`] if the manifest cannot be written
    ///
    /// Per-file hashing failures are not errors; they appear in
    /// [`GenerateReport::skipped`].
    pub fn generate(
        &mut self,
        dir_path: &str,
        manifest_path: &Path,
    ) -> Result<GenerateReport, IntegrityError> {
        const OP: Operation = Operation::Generate;

        let snapshot = scanner::list_regular_files(dir_path).map_err(|e| self.fatal(OP, dir_path, e))?;

        if manifest_inside(dir_path, manifest_path) {
            self.emit(
                EventLevel::Warning,
                OP,
                manifest_path.display().to_string(),
                "integrity list is inside the scanned directory and will be reported as a new file on verify",
            );
        }

        let mut manifest = Manifest::new();
        let mut skipped = Vec::new();

        for path in snapshot.unrepresentable() {
            let subject = path.display().to_string();
            let reason = "file name is not valid UTF-8".to_string();
            self.emit(EventLevel::Warning, OP, subject.clone(), format!("Skipping file: {reason}"));
            skipped.push(SkippedFile {
                path: subject,
                reason,
            });
        }
        skipped.extend(self.warn_unreadable(OP, &snapshot));

        for path in snapshot.files() {
            match self.hash(path) {
                Ok(digest) => {
                    if path.chars().any(char::is_whitespace) {
                        self.emit(
                            EventLevel::Warning,
                            OP,
                            path.clone(),
                            "path contains whitespace; this entry will not parse back",
                        );
                    }
                    self.emit(EventLevel::Info, OP, path.clone(), "File added to integrity list");
                    manifest.push(ManifestEntry::new(path.clone(), digest));
                }
                Err(e) => {
                    let reason = e.to_string();
                    self.emit(
                        EventLevel::Warning,
                        OP,
                        path.clone(),
                        format!("Failed to calculate hash, skipping: {reason}"),
                    );
                    skipped.push(SkippedFile {
                        path: path.clone(),
                        reason,
                    });
                }
            }
        }

        let subject = manifest_path.display().to_string();
        manifest
            .save(manifest_path)
            .map_err(|e| self.fatal(OP, &subject, e))?;

        self.emit(
            EventLevel::Info,
            OP,
            subject,
            format!("Integrity list generated with {} entries", manifest.len()),
        );

        Ok(GenerateReport {
            manifest_path: manifest_path.to_path_buf(),
            written: manifest.len(),
            skipped,
        })
    }

    /// Verify `dir_path` against the manifest stored at `manifest_path`.
    ///
    /// # Errors
    ///
    /// - [`IntegrityError::ManifestRead`] if the manifest cannot be read
    /// - [`IntegrityError::Format`] if the manifest is malformed
    /// - [`IntegrityError::DirNotFound`] if the directory cannot be listed
    pub fn verify(
        &mut self,
        dir_path: &str,
        manifest_path: &Path,
    ) -> Result<VerificationResult, IntegrityError> {
        let manifest = self.load(Operation::Verify, manifest_path)?;
        self.verify_manifest(dir_path, &manifest)
    }

    /// Verify `dir_path` against an already validated manifest.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrityError::DirNotFound`] if the directory cannot be
    /// listed for the unexpected-file pass.
    pub fn verify_manifest(
        &mut self,
        dir_path: &str,
        manifest: &Manifest,
    ) -> Result<VerificationResult, IntegrityError> {
        const OP: Operation = Operation::Verify;

        let mut discrepancies = Vec::new();

        for entry in manifest {
            let discrepancy = match self.hash(&entry.path) {
                Ok(actual) if actual == entry.digest => None,
                Ok(_) => Some(Discrepancy::HashMismatch(entry.path.clone())),
                Err(_) => Some(Discrepancy::FileMissing(entry.path.clone())),
            };

            match discrepancy {
                Some(d) => {
                    self.emit(EventLevel::Error, OP, entry.path.clone(), d.to_string());
                    discrepancies.push(d);
                }
                None => self.emit(EventLevel::Info, OP, entry.path.clone(), "File integrity verified"),
            }
        }

        let snapshot = scanner::list_regular_files(dir_path).map_err(|e| self.fatal(OP, dir_path, e))?;
        let listed = manifest.paths();

        let mut unexpected: Vec<String> = snapshot
            .files()
            .iter()
            .filter(|path| !listed.contains(path.as_str()))
            .cloned()
            .collect();
        // A UTF-8 manifest can never list these
        unexpected.extend(
            snapshot
                .unrepresentable()
                .iter()
                .map(|path| path.display().to_string()),
        );

        self.warn_unreadable(OP, &snapshot);

        for path in unexpected {
            let d = Discrepancy::UnexpectedFile(path);
            self.emit(EventLevel::Error, OP, d.path().to_string(), d.to_string());
            discrepancies.push(d);
        }

        let result = VerificationResult::new(manifest.len(), discrepancies);
        if result.is_pass() {
            self.emit(EventLevel::Info, OP, dir_path, "Integrity check passed");
        } else {
            self.emit(
                EventLevel::Error,
                OP,
                dir_path,
                format!(
                    "Integrity check failed with {} discrepancies",
                    result.discrepancies().len()
                ),
            );
        }

        Ok(result)
    }

    /// Validate the manifest at `manifest_path` without touching any listed file.
    ///
    /// # Errors
    ///
    /// - [`IntegrityError::ManifestRead`] if the manifest cannot be read
    /// - [`IntegrityError::Format`] if the manifest is malformed
    pub fn check(&mut self, manifest_path: &Path) -> Result<Manifest, IntegrityError> {
        let manifest = self.load(Operation::Check, manifest_path)?;
        self.emit(
            EventLevel::Info,
            Operation::Check,
            manifest_path.display().to_string(),
            "Integrity list format is correct",
        );
        Ok(manifest)
    }

    fn load(&mut self, op: Operation, manifest_path: &Path) -> Result<Manifest, IntegrityError> {
        Manifest::load(manifest_path)
            .map_err(|e| self.fatal(op, &manifest_path.display().to_string(), e))
    }

    /// Warn about every entry the snapshot could not inspect.
    fn warn_unreadable(&mut self, op: Operation, snapshot: &DirectorySnapshot) -> Vec<SkippedFile> {
        let mut skipped = Vec::new();
        for entry in snapshot.unreadable() {
            let subject = entry.path.display().to_string();
            self.emit(
                EventLevel::Warning,
                op,
                subject.clone(),
                format!("Cannot inspect directory entry: {}", entry.reason),
            );
            skipped.push(SkippedFile {
                path: subject,
                reason: entry.reason.clone(),
            });
        }
        skipped
    }

    fn hash(&self, path: &str) -> Result<Digest, DigestError> {
        digest::hash_file_chunked(Path::new(path), self.chunk_size)
    }

    fn emit(
        &mut self,
        level: EventLevel,
        operation: Operation,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.sink.emit(Event::new(level, operation, subject, message));
    }

    /// Report a fatal error as an event and hand it back for propagation.
    fn fatal(&mut self, op: Operation, subject: &str, err: IntegrityError) -> IntegrityError {
        self.emit(EventLevel::Error, op, subject, err.to_string());
        err
    }
}

/// Whether `manifest_path` would be listed by a snapshot of `dir_path`.
fn manifest_inside(dir_path: &str, manifest_path: &Path) -> bool {
    let parent = match manifest_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (std::fs::canonicalize(dir_path), std::fs::canonicalize(parent)) {
        (Ok(dir), Ok(parent)) => dir == parent,
        _ => false,
    }
}
