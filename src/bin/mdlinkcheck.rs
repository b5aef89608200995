use clap::Parser;
use mdlinkcheck::checker::HttpLinkChecker;
use mdlinkcheck::config::{self, CliConfig, Config, ConfigSource};
use mdlinkcheck::core::constants::exit_codes;
use mdlinkcheck::core::error::{LinkCheckError, Result};
use mdlinkcheck::discovery::{FileFinder, MarkdownFinder, resolve_root};
use mdlinkcheck::reporting::logging;
use mdlinkcheck::reporting::{ConsoleReporter, Report, run_checks};
use mdlinkcheck::ui::{Cli, cli_to_config};

use std::path::Path;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            logging::log_error("Link check aborted", Some(&e));
            eprintln!("Error: {e}");
            std::process::exit(exit_codes::FAILURE);
        }
    }
}

/// Main link check logic extracted from main() for testing
pub async fn run(cli: &Cli) -> Result<i32> {
    let cli_config = cli_to_config(cli);
    logging::init_logger(cli_config.verbose, cli_config.quiet);

    let root = resolve_root(Path::new(cli_config.root.as_deref().unwrap_or(".")))?;
    let mut reporter = ConsoleReporter::stdio(cli_config.quiet);

    let (config, source) = load_config(&root, &cli_config)?;
    reporter.config_loaded(&source);
    logging::log_config_source(&source, &config);

    let files = MarkdownFinder::default().find_markdown_files(&root)?;
    reporter.files_found(files.len());
    let paths: Vec<_> = files.iter().map(|file| file.path()).collect();
    logging::log_discovery(&paths);

    let checker = HttpLinkChecker::default();
    let outcome = run_checks(&files, &config, &checker, &mut reporter).await;
    reporter.summary(&outcome);

    Ok(outcome.exit_code())
}

/// Resolve the active configuration and apply command-line overrides.
///
/// A missing or unparsable config file falls back to defaults; invalid
/// command-line values are fatal.
fn load_config(root: &Path, cli_config: &CliConfig) -> Result<(Config, ConfigSource)> {
    cli_config
        .validate()
        .map_err(|e| LinkCheckError::InvalidArgument(e.to_string()))?;

    let (mut config, source) = if cli_config.no_config {
        (Config::default(), ConfigSource::Disabled)
    } else {
        config::load_or_default(&config::config_path(root, cli_config))
    };

    config.merge_with_cli(cli_config);
    Ok((config, source))
}
