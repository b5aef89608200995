//! Configuration management
//!
//! This module handles loading the JSON configuration file, the built-in
//! fallback configuration, and overrides coming from CLI arguments.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderName, HeaderValue};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{checker, config as fallback};
use crate::core::error::{LinkCheckError, Result};

/// Links matching `pattern` are not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnorePattern {
    pub pattern: String,
}

impl IgnorePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

/// Rewrites links matching `pattern` before they are validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementPattern {
    pub pattern: String,
    pub replacement: String,
    /// Replace every match instead of only the first one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
}

/// Extra request headers for links starting with one of `urls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpHeaderRule {
    pub urls: Vec<String>,
    pub headers: BTreeMap<String, String>,
}

impl HttpHeaderRule {
    pub fn applies_to(&self, link: &str) -> bool {
        self.urls.iter().any(|prefix| link.starts_with(prefix.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Regex patterns for links that are skipped
    #[serde(default)]
    pub ignore_patterns: Vec<IgnorePattern>,

    /// Rewrite rules applied to links before validation
    #[serde(default)]
    pub replacement_patterns: Vec<ReplacementPattern>,

    /// Request timeout as a duration string ("20s", "500ms", ...) or milliseconds
    #[serde(
        default,
        deserialize_with = "deserialize_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<String>,

    /// Retry requests answered with 429 Too Many Requests
    #[serde(
        rename = "retryOn429",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub retry_on_429: Option<bool>,

    /// Number of retries for rate-limited requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u32>,

    /// Delay before retrying a 429 response that has no Retry-After header
    #[serde(
        default,
        deserialize_with = "deserialize_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub fallback_retry_delay: Option<String>,

    /// HTTP status codes treated as alive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alive_status_codes: Option<Vec<u16>>,

    /// Request headers scoped by URL prefix
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub http_headers: Vec<HttpHeaderRule>,
}

/// The configuration used whenever no usable configuration file exists.
impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_patterns: vec![IgnorePattern::new(fallback::INTERNAL_DOMAIN_PATTERN)],
            replacement_patterns: Vec::new(),
            timeout: Some(fallback::DEFAULT_TIMEOUT.to_string()),
            retry_on_429: Some(fallback::DEFAULT_RETRY_ON_429),
            retry_count: Some(fallback::DEFAULT_RETRY_COUNT),
            fallback_retry_delay: None,
            alive_status_codes: None,
            http_headers: Vec::new(),
        }
    }
}

/// Durations are written either as strings ("20s") or as plain
/// millisecond numbers (20000).
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Text(String),
    Millis(u64),
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<RawDuration>::deserialize(deserializer)?.map(|raw| match raw {
            RawDuration::Text(text) => text,
            RawDuration::Millis(millis) => millis.to_string(),
        }),
    )
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// No file at this path
    Missing(PathBuf),
    /// The file exists but could not be read or parsed
    Invalid { path: PathBuf, error: String },
    /// Loading was turned off with --no-config
    Disabled,
}

/// Load the configuration at `path`, falling back to `Config::default()`.
///
/// Never fails: a missing, unreadable or malformed file yields the defaults
/// together with a `ConfigSource` describing why. A file that parses is
/// returned as written, even when some of its values are unusable; those
/// surface later as per-file check errors.
pub fn load_or_default(path: &Path) -> (Config, ConfigSource) {
    match Config::load_from_file(path) {
        Ok(config) => {
            debug!("Loaded configuration from {}", path.display());
            if let Err(err) = config.validate() {
                warn!(
                    "Configuration file {} has unusable values: {err}",
                    path.display()
                );
            }
            (config, ConfigSource::File(path.to_path_buf()))
        }
        Err(LinkCheckError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
            debug!("No configuration file at {}", path.display());
            (Config::default(), ConfigSource::Missing(path.to_path_buf()))
        }
        Err(err) => {
            warn!("Ignoring configuration file {}: {err}", path.display());
            (
                Config::default(),
                ConfigSource::Invalid {
                    path: path.to_path_buf(),
                    error: err.to_string(),
                },
            )
        }
    }
}

/// Path of the configuration file for a scan rooted at `root`.
pub fn config_path(root: &Path, cli_config: &CliConfig) -> PathBuf {
    match cli_config.config_file {
        Some(ref file) => PathBuf::from(file),
        None => root.join(fallback::CONFIG_FILE_NAME),
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref timeout) = cli_config.timeout {
            self.timeout = Some(timeout.clone());
        }
        if let Some(retry_count) = cli_config.retry_count {
            self.retry_count = Some(retry_count);
        }
        self.ignore_patterns.extend(
            cli_config
                .ignore_patterns
                .iter()
                .map(|pattern| IgnorePattern::new(pattern.as_str())),
        );
    }

    /// Compile ignore patterns into regex objects
    pub fn compile_ignore_patterns(&self) -> Result<Vec<Regex>> {
        self.ignore_patterns
            .iter()
            .map(|ignore| Regex::new(&ignore.pattern).map_err(LinkCheckError::from))
            .collect()
    }

    /// Compile replacement patterns, keeping their replacement strings
    pub fn compile_replacement_patterns(&self) -> Result<Vec<CompiledReplacement>> {
        self.replacement_patterns
            .iter()
            .map(|rule| {
                Ok(CompiledReplacement {
                    regex: Regex::new(&rule.pattern)?,
                    replacement: rule.replacement.clone(),
                    global: rule.global.unwrap_or(false),
                })
            })
            .collect()
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Result<Duration> {
        parse_duration(self.timeout.as_deref().unwrap_or(checker::TIMEOUT))
    }

    /// Get the 429 fallback delay as Duration
    pub fn fallback_retry_delay_duration(&self) -> Result<Duration> {
        parse_duration(
            self.fallback_retry_delay
                .as_deref()
                .unwrap_or(checker::FALLBACK_RETRY_DELAY),
        )
    }

    pub fn retry_on_429_enabled(&self) -> bool {
        self.retry_on_429.unwrap_or(checker::RETRY_ON_429)
    }

    pub fn retry_count_or_default(&self) -> u32 {
        self.retry_count.unwrap_or(checker::RETRY_COUNT)
    }

    pub fn alive_status_codes_or_default(&self) -> Vec<u16> {
        self.alive_status_codes
            .clone()
            .unwrap_or_else(|| checker::ALIVE_STATUS_CODES.to_vec())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.compile_ignore_patterns()?;
        self.compile_replacement_patterns()?;
        self.timeout_duration()?;
        self.fallback_retry_delay_duration()?;

        if let Some(ref codes) = self.alive_status_codes {
            for &code in codes {
                if !(100..=599).contains(&code) {
                    return Err(LinkCheckError::Config(format!(
                        "Status code {code} is not a valid HTTP status code. Expected a number between 100-599."
                    )));
                }
            }
        }

        for rule in &self.http_headers {
            for (name, value) in &rule.headers {
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                    LinkCheckError::Config(format!("Invalid HTTP header name '{name}': {e}"))
                })?;
                HeaderValue::from_str(value).map_err(|e| {
                    LinkCheckError::Config(format!("Invalid value for HTTP header '{name}': {e}"))
                })?;
            }
        }

        Ok(())
    }
}

/// A replacement pattern ready to be applied to links.
#[derive(Debug, Clone)]
pub struct CompiledReplacement {
    pub regex: Regex,
    pub replacement: String,
    pub global: bool,
}

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*(ms|s|m|h|d)?\s*$").expect("Failed to compile duration regex")
});

/// Parse a duration string such as "20s", "500ms", "1.5m" or "2h".
///
/// A bare number is interpreted as milliseconds.
pub fn parse_duration(value: &str) -> Result<Duration> {
    let captures = DURATION_PATTERN.captures(value).ok_or_else(|| {
        LinkCheckError::Config(format!(
            "Invalid duration '{value}'. Expected a number with an optional ms, s, m, h or d suffix."
        ))
    })?;

    let amount: f64 = captures[1]
        .parse()
        .map_err(|_| LinkCheckError::Config(format!("Invalid duration '{value}'")))?;
    let millis_per_unit = match captures.get(2).map(|unit| unit.as_str()) {
        None | Some("ms") => 1.0,
        Some("s") => 1_000.0,
        Some("m") => 60_000.0,
        Some("h") => 3_600_000.0,
        Some(_) => 86_400_000.0,
    };

    // Whole nanoseconds, so "1ms" is exactly Duration::from_millis(1)
    let nanos = (amount * millis_per_unit * 1_000_000.0).round();
    if !nanos.is_finite() || nanos >= u64::MAX as f64 {
        return Err(LinkCheckError::Config(format!(
            "Invalid duration '{value}': value is too large"
        )));
    }
    Ok(Duration::from_nanos(nanos as u64))
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub root: Option<String>,            // [ROOT]
    pub config_file: Option<String>,     // --config
    pub no_config: bool,                 // --no-config
    pub timeout: Option<String>,         // --timeout
    pub retry_count: Option<u32>,        // --retry-count
    pub ignore_patterns: Vec<String>,    // --ignore-pattern
    pub quiet: bool,                     // --quiet
    pub verbose: bool,                   // --verbose
}

impl CliConfig {
    /// Check the values given on the command line
    pub fn validate(&self) -> Result<()> {
        if let Some(ref timeout) = self.timeout {
            parse_duration(timeout)?;
        }
        for pattern in &self.ignore_patterns {
            Regex::new(pattern)?;
        }
        Ok(())
    }
}
