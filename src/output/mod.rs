//! Terminal output for the `intact` binary.
//!
//! Results go to stdout, problems to stderr. Quiet mode hides routine
//! messages but never the verification verdict or errors.

use colored::Colorize;
use std::sync::atomic::{AtomicU8, Ordering};

/// Verbosity level for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Only verdicts, warnings and errors.
    Quiet = 0,
    /// Default: summaries and per-discrepancy detail as well.
    Normal = 1,
}

/// Global verbosity setting (default: Normal).
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Sets the global verbosity level for all output functions.
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Gets the current global verbosity level.
pub fn get_verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        _ => Verbosity::Normal,
    }
}

fn is_quiet() -> bool {
    get_verbosity() == Verbosity::Quiet
}

/// Prints a success message in green (respects quiet mode).
pub fn success(message: &str) {
    if is_quiet() {
        return;
    }
    println!("{}", message.green());
}

/// Prints an informational message in dimmed color (respects quiet mode).
pub fn info(message: &str) {
    if is_quiet() {
        return;
    }
    println!("{}", message.dimmed());
}

/// Prints a git-style status line, e.g. `    modified: dir/b.txt` (respects quiet mode).
pub fn status_line(label: &str, path: &str) {
    if is_quiet() {
        return;
    }
    println!("    {} {}", format!("{label}:").red(), path);
}

/// Prints the aggregate verdict (always shown).
pub fn verdict(passed: bool) {
    if passed {
        println!("{}", "Integrity check passed".green().bold());
    } else {
        println!("{}", "Integrity check failed".red().bold());
    }
}

/// Prints a warning message in bold yellow (always shown).
pub fn warning(message: &str) {
    eprintln!("{}", message.yellow().bold());
}
