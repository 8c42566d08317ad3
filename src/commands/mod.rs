//! Command implementations behind the `intact` binary.
//!
//! Each command runs one coordinator operation, prints its summary through
//! [`crate::output`], and hands the result back so the caller can pick an
//! exit code.

pub mod check;
pub mod generate;
pub mod verify;
