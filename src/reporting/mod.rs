//! Result aggregation and reporting
//!
//! This module runs the per-file checks in sequence, collects their
//! outcomes, and handles console output and structured logging.

pub mod aggregator;
pub mod console;
pub mod logging;

// Re-export commonly used items
pub use aggregator::{FileOutcome, RunOutcome, run_checks};
pub use console::{ConsoleReporter, Report};
