//! Per-file link validation
//!
//! This module reads one markdown file, hands it to the link checker with
//! file-scoped options, and turns the results into a pass/fail outcome.

pub mod file_check;

// Re-export commonly used items
pub use file_check::{FileReport, check_file};
