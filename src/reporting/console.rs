//! Human-readable console output for a link check run

use std::io::{self, Stderr, Stdout, Write};

use crate::config::ConfigSource;
use crate::core::constants::display;
use crate::core::error::LinkCheckError;
use crate::core::types::{LinkResult, MarkdownFile};
use crate::reporting::aggregator::RunOutcome;
use crate::ui::color::{Colors, colorize, colorize_err};

/// Receives progress of a run as it happens.
pub trait Report {
    fn config_loaded(&mut self, source: &ConfigSource);
    fn files_found(&mut self, count: usize);
    fn file_started(&mut self, file: &MarkdownFile);
    fn file_passed(&mut self, file: &MarkdownFile);
    fn broken_links(&mut self, file: &MarkdownFile, broken: &[&LinkResult]);
    fn check_errored(&mut self, file: &MarkdownFile, error: &LinkCheckError);
    fn summary(&mut self, outcome: &RunOutcome);
}

/// Writes informational lines to `out` and failures to `err`.
pub struct ConsoleReporter<O: Write, E: Write> {
    out: O,
    err: E,
    quiet: bool,
}

impl ConsoleReporter<Stdout, Stderr> {
    pub fn stdio(quiet: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), quiet)
    }
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    pub fn new(out: O, err: E, quiet: bool) -> Self {
        Self { out, err, quiet }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    // Console output is best-effort; a closed pipe must not abort the run.
    fn info(&mut self, line: &str) {
        if !self.quiet {
            let _ = writeln!(self.out, "{line}");
        }
    }

    fn error(&mut self, line: &str) {
        let _ = writeln!(self.err, "{line}");
    }
}

impl<O: Write, E: Write> Report for ConsoleReporter<O, E> {
    fn config_loaded(&mut self, source: &ConfigSource) {
        let line = match source {
            ConfigSource::File(path) => format!(
                "Loaded configuration from {}",
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            ),
            ConfigSource::Missing(_) => {
                "No configuration file found, using default configuration".to_string()
            }
            ConfigSource::Invalid { path, error } => format!(
                "Could not use configuration file {} ({error}), using default configuration",
                path.display()
            ),
            ConfigSource::Disabled => {
                "Configuration file disabled, using default configuration".to_string()
            }
        };
        self.info(&line);
    }

    fn files_found(&mut self, count: usize) {
        self.info(&format!("Found {count} markdown files"));
    }

    fn file_started(&mut self, file: &MarkdownFile) {
        self.info(&format!("\nChecking links in file: {file}"));
    }

    fn file_passed(&mut self, file: &MarkdownFile) {
        let line = format!("{} All links in {file} are valid", display::SUCCESS_EMOJI);
        self.info(&colorize(&line, Colors::GREEN));
    }

    fn broken_links(&mut self, file: &MarkdownFile, broken: &[&LinkResult]) {
        let header = format!(
            "\n{} Found {} broken links in {file}:",
            display::ERROR_EMOJI,
            broken.len()
        );
        self.error(&colorize_err(&header, Colors::RED));
        for link in broken {
            self.error(&format!("   - {}: {}", link.link, link.status_label()));
        }
    }

    fn check_errored(&mut self, file: &MarkdownFile, error: &LinkCheckError) {
        self.error(&colorize_err(
            &format!("Error checking links in {file}: {error}"),
            Colors::RED,
        ));
    }

    fn summary(&mut self, outcome: &RunOutcome) {
        if outcome.has_errors() {
            let line = format!(
                "\n{} Some links are broken. Please fix them before committing.",
                display::ERROR_EMOJI
            );
            self.error(&colorize_err(&line, Colors::BOLD_RED));
        } else {
            let line = format!(
                "\n{} All links in all markdown files are valid!",
                display::SUCCESS_EMOJI
            );
            // The summary is printed even in quiet mode
            let _ = writeln!(self.out, "{}", colorize(&line, Colors::BOLD_GREEN));
        }
    }
}
