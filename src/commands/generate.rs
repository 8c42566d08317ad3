use crate::IntactContext;
use crate::integrity::GenerateReport;
use crate::output;
use anyhow::{Context, Result};
use std::path::Path;

/// Execute generate command - write an integrity list for a directory
///
/// Files that cannot be hashed are left out of the list and counted as
/// skipped; they do not fail the command.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be listed
/// - The integrity list cannot be written
pub fn execute(ctx: &IntactContext, directory: &str, list: &Path) -> Result<GenerateReport> {
    let report = ctx
        .coordinator()
        .generate(directory, list)
        .with_context(|| format!("Failed to generate integrity list for {directory}"))?;

    output::success(&format!(
        "Integrity list generated successfully ({} files, {} skipped)",
        report.written,
        report.skipped.len()
    ));

    Ok(report)
}
