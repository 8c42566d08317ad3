use crate::IntactContext;
use crate::integrity::VerificationResult;
use crate::output;
use anyhow::{Context, Result};
use std::path::Path;

/// Execute verify command - compare a directory against its integrity list
///
/// Prints one status line per discrepancy, then the verdict and a count
/// per discrepancy kind. A failed verdict is not an error; check
/// [`VerificationResult::is_pass`].
///
/// # Errors
///
/// Returns an error if:
/// - The integrity list cannot be read or is malformed
/// - The directory cannot be listed
pub fn execute(ctx: &IntactContext, directory: &str, list: &Path) -> Result<VerificationResult> {
    let result = ctx
        .coordinator()
        .verify(directory, list)
        .with_context(|| format!("Failed to verify {directory} against {}", list.display()))?;

    print_result(&result);
    Ok(result)
}

fn print_result(result: &VerificationResult) {
    for discrepancy in result.discrepancies() {
        output::status_line(discrepancy.label(), discrepancy.path());
    }

    output::verdict(result.is_pass());

    if !result.is_pass() {
        let (modified, missing, unexpected) = result.counts();
        output::info(&format!(
            "{modified} modified, {missing} missing, {unexpected} new ({} listed)",
            result.checked()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::integrity::Discrepancy;
    use tempfile::tempdir;

    #[test]
    fn test_verify_detects_new_file() -> Result<()> {
        let dir = tempdir()?;
        let data = dir.path().join("data");
        std::fs::create_dir(&data)?;
        std::fs::write(data.join("a.txt"), "hello")?;
        let list = dir.path().join("list.txt");
        let directory = data.to_string_lossy().into_owned();

        let ctx = IntactContext::new_explicit(Config::default());
        super::super::generate::execute(&ctx, &directory, &list)?;
        assert!(execute(&ctx, &directory, &list)?.is_pass());

        std::fs::write(data.join("c.txt"), "new")?;
        let result = execute(&ctx, &directory, &list)?;
        assert_eq!(
            result.discrepancies(),
            &[Discrepancy::UnexpectedFile(format!("{directory}/c.txt"))]
        );
        Ok(())
    }

    #[test]
    fn test_verify_malformed_list_is_error() -> Result<()> {
        let dir = tempdir()?;
        let list = dir.path().join("list.txt");
        std::fs::write(&list, "onlypath\n")?;

        let ctx = IntactContext::new_explicit(Config::default());
        let err = execute(&ctx, &dir.path().to_string_lossy(), &list).unwrap_err();
        assert!(format!("{err:#}").contains("missing hash"));
        Ok(())
    }
}
