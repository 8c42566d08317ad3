//! Results returned by the integrity coordinator.

use std::fmt;
use std::path::PathBuf;

/// One deviation between a manifest and the live directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Discrepancy {
    /// Listed file exists but its content digest differs
    HashMismatch(String),
    /// Listed file is absent or unreadable
    FileMissing(String),
    /// File on disk that the manifest does not list
    UnexpectedFile(String),
}

impl Discrepancy {
    /// Path the discrepancy is about.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::HashMismatch(p) | Self::FileMissing(p) | Self::UnexpectedFile(p) => p,
        }
    }

    /// Short git-status style label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HashMismatch(_) => "modified",
            Self::FileMissing(_) => "missing",
            Self::UnexpectedFile(_) => "new file",
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HashMismatch(p) => write!(f, "Integrity check failed for file {p}"),
            Self::FileMissing(p) => write!(f, "File missing: {p}"),
            Self::UnexpectedFile(p) => write!(f, "New file detected: {p}"),
        }
    }
}

/// Overall verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No discrepancies
    Pass,
    /// At least one discrepancy
    Fail,
}

/// Outcome of a verification run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    status: Status,
    discrepancies: Vec<Discrepancy>,
    checked: usize,
}

impl VerificationResult {
    /// Build a result; the status follows from whether `discrepancies` is empty.
    #[must_use]
    pub fn new(checked: usize, discrepancies: Vec<Discrepancy>) -> Self {
        let status = if discrepancies.is_empty() {
            Status::Pass
        } else {
            Status::Fail
        };
        Self {
            status,
            discrepancies,
            checked,
        }
    }

    /// Pass or fail.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Whether verification passed.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.status == Status::Pass
    }

    /// Every discrepancy: manifest-order entries first, then unexpected files.
    #[must_use]
    pub fn discrepancies(&self) -> &[Discrepancy] {
        &self.discrepancies
    }

    /// Number of manifest entries that were checked.
    #[must_use]
    pub const fn checked(&self) -> usize {
        self.checked
    }

    /// Counts of (modified, missing, unexpected).
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        self.discrepancies
            .iter()
            .fold((0, 0, 0), |(m, d, u), disc| match disc {
                Discrepancy::HashMismatch(_) => (m + 1, d, u),
                Discrepancy::FileMissing(_) => (m, d + 1, u),
                Discrepancy::UnexpectedFile(_) => (m, d, u + 1),
            })
    }
}

/// A file left out of a generated manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path that was skipped
    pub path: String,
    /// Why it was skipped
    pub reason: String,
}

/// Outcome of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Where the manifest was written
    pub manifest_path: PathBuf,
    /// Number of entries written
    pub written: usize,
    /// Files that could not be hashed
    pub skipped: Vec<SkippedFile>,
}
