//! mdlinkcheck - check every link in a tree of markdown files
//!
//! The run is split into a few stages, each in its own module:
//!
//! - [`config`] loads `.markdown-link-check.json` or falls back to defaults
//! - [`discovery`] finds the `*.md` files under a root, skipping `node_modules`
//! - [`checker`] extracts and resolves the links of one document
//! - [`validation`] turns one file's link results into a pass/fail outcome
//! - [`reporting`] runs the files in order, prints progress and computes the exit code

pub mod checker;
pub mod config;
pub mod core;
pub mod discovery;
pub mod reporting;
pub mod ui;
pub mod validation;

pub use checker::{HttpLinkChecker, LinkCheck, LinkCheckOptions};
pub use config::{CliConfig, Config, ConfigSource};
pub use core::{LinkCheckError, LinkResult, LinkStatus, MarkdownFile, Result};
pub use discovery::{FileFinder, MarkdownFinder};
pub use reporting::{ConsoleReporter, Report, RunOutcome, run_checks};
pub use validation::{FileReport, check_file};
