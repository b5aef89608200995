//! User interface and interaction
//!
//! This module contains the command-line definition and the terminal
//! color helpers used by the console reporter.

pub mod cli;
pub mod color;

// Re-export commonly used items
pub use cli::{Cli, cli_to_config};
