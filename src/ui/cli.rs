// Command-line interface definitions and parsing for mdlinkcheck

use crate::config::CliConfig;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for markdown files (default: current directory)
    pub root: Option<String>,

    // Configuration
    /// Use specific config file (default: <ROOT>/.markdown-link-check.json)
    #[arg(short = 'c', long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore the config file and use the built-in defaults
    #[arg(long, conflicts_with = "config", help_heading = "Configuration")]
    pub no_config: bool,

    // Link Checking
    /// Per-request timeout, e.g. 10s or 500ms
    #[arg(
        short = 't',
        long,
        value_name = "DURATION",
        help_heading = "Link Checking"
    )]
    pub timeout: Option<String>,

    /// Retries for HTTP 429 responses
    #[arg(long, value_name = "COUNT", help_heading = "Link Checking")]
    pub retry_count: Option<u32>,

    /// Additional link patterns to ignore (regex)
    #[arg(long, value_name = "REGEX", help_heading = "Link Checking")]
    pub ignore_pattern: Vec<String>,

    // Output & Verbosity
    /// Only print broken links and the final summary
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(
        short = 'v',
        long,
        conflicts_with = "quiet",
        help_heading = "Output & Verbosity"
    )]
    pub verbose: bool,
}

/// Convert derive-based CLI arguments directly to CliConfig structure
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        root: cli.root.clone(),
        config_file: cli.config.clone(),
        no_config: cli.no_config,
        timeout: cli.timeout.clone(),
        retry_count: cli.retry_count,
        ignore_patterns: cli.ignore_pattern.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
    }
}
