use crate::IntactContext;
use crate::output;
use anyhow::{Context, Result};
use std::path::Path;

/// Execute check command - validate an integrity list without hashing anything
///
/// Returns the number of entries in the list.
///
/// # Errors
///
/// Returns an error if the list cannot be read or is malformed
pub fn execute(ctx: &IntactContext, list: &Path) -> Result<usize> {
    let manifest = ctx
        .coordinator()
        .check(list)
        .with_context(|| format!("Failed to check {}", list.display()))?;

    output::success(&format!(
        "Integrity list format is correct ({} entries)",
        manifest.len()
    ));

    Ok(manifest.len())
}
