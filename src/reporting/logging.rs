use crate::config::{Config, ConfigSource};
use crate::core::types::{LinkResult, LinkStatus};
use log::{debug, error, info};
use std::io::Write;

/// Initialize the logger with appropriate level based on verbosity
///
/// `RUST_LOG` still applies on top of the chosen default level.
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    let initialized = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .try_init();

    if initialized.is_ok() {
        debug!("Logger initialized with level: {level:?}");
    }
}

/// Log which configuration is in effect
pub fn log_config_source(source: &ConfigSource, config: &Config) {
    match source {
        ConfigSource::File(path) => info!("Using configuration file {}", path.display()),
        ConfigSource::Missing(path) => {
            info!("No configuration file at {}, using defaults", path.display())
        }
        ConfigSource::Invalid { path, error } => {
            info!("Configuration file {} unusable ({error}), using defaults", path.display())
        }
        ConfigSource::Disabled => info!("Configuration file disabled, using defaults"),
    }
    debug!(
        "Configuration: ignore_patterns={}, replacement_patterns={}, timeout={:?}, retry_on_429={:?}, retry_count={:?}",
        config.ignore_patterns.len(),
        config.replacement_patterns.len(),
        config.timeout,
        config.retry_on_429,
        config.retry_count
    );
}

/// Log file discovery information
pub fn log_discovery<P: AsRef<std::path::Path>>(files: &[P]) {
    info!("Found {} markdown file(s)", files.len());
    for (i, file) in files.iter().enumerate() {
        debug!("  {}. {}", i + 1, file.as_ref().display());
    }
}

/// Log individual link results for debugging
pub fn log_link_result(result: &LinkResult) {
    match (result.status, result.status_code, result.err.as_deref()) {
        (LinkStatus::Ignored, _, _) => debug!("- {} (ignored)", result.link),
        (LinkStatus::Alive, Some(code), _) => debug!("✓ {} -> {code}", result.link),
        (_, Some(code), _) => debug!("✗ {} -> {code}", result.link),
        (_, None, Some(err)) => debug!("✗ {} -> {err}", result.link),
        (_, None, None) => debug!("? {} -> unknown", result.link),
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
