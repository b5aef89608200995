//! Link checking
//!
//! This module defines the link-checking seam used by the per-file
//! validation step, and the default implementation that extracts links
//! from markdown and resolves them over HTTP or on disk.

pub mod extract;
pub mod http;

use async_trait::async_trait;
use regex::Regex;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::config::{CompiledReplacement, Config, HttpHeaderRule};
use crate::core::constants::checker;
use crate::core::error::{LinkCheckError, Result};
use crate::core::types::LinkResult;

// Re-export commonly used items
pub use extract::{extract_links, heading_anchors};
pub use http::HttpLinkChecker;

/// Checks every link in a markdown document.
///
/// Returns one `LinkResult` per unique link, in the order the links first
/// appear. An `Err` means the document could not be checked at all.
#[async_trait]
pub trait LinkCheck: Send + Sync {
    async fn check_markdown(
        &self,
        markdown: &str,
        options: &LinkCheckOptions,
    ) -> Result<Vec<LinkResult>>;
}

/// Options for checking one document: the file-scoped base URL merged with
/// the global configuration.
#[derive(Debug, Clone)]
pub struct LinkCheckOptions {
    pub base_url: Url,
    pub ignore_patterns: Vec<Regex>,
    pub replacement_patterns: Vec<CompiledReplacement>,
    pub timeout: Duration,
    pub retry_on_429: bool,
    pub retry_count: u32,
    pub fallback_retry_delay: Duration,
    pub alive_status_codes: Vec<u16>,
    pub http_headers: Vec<HttpHeaderRule>,
}

impl LinkCheckOptions {
    pub fn new(base_url: Url, config: &Config) -> Result<Self> {
        Ok(Self {
            base_url,
            ignore_patterns: config.compile_ignore_patterns()?,
            replacement_patterns: config.compile_replacement_patterns()?,
            timeout: config.timeout_duration()?,
            retry_on_429: config.retry_on_429_enabled(),
            retry_count: config.retry_count_or_default(),
            fallback_retry_delay: config.fallback_retry_delay_duration()?,
            alive_status_codes: config.alive_status_codes_or_default(),
            http_headers: config.http_headers.clone(),
        })
    }

    /// Options for a document living in `dir`; relative links resolve
    /// against `file://<dir>/`.
    pub fn for_directory(dir: &Path, config: &Config) -> Result<Self> {
        let base_url = Url::from_directory_path(dir).map_err(|_| {
            LinkCheckError::InvalidArgument(format!(
                "Cannot build a base URL from '{}'",
                dir.display()
            ))
        })?;
        Self::new(base_url, config)
    }

    pub fn is_ignored(&self, link: &str) -> bool {
        self.ignore_patterns.iter().any(|regex| regex.is_match(link))
    }

    /// Apply every replacement pattern in order.
    pub fn apply_replacements(&self, link: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        self.replacement_patterns
            .iter()
            .fold(link.to_string(), |current, rule| {
                let replacement = rule.replacement.replace(checker::BASE_URL_TOKEN, base);
                let replaced = if rule.global {
                    rule.regex.replace_all(&current, replacement.as_str())
                } else {
                    rule.regex.replace(&current, replacement.as_str())
                };
                replaced.into_owned()
            })
    }

    pub fn is_alive_status(&self, status: u16) -> bool {
        self.alive_status_codes.contains(&status)
    }
}
