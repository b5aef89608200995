use async_trait::async_trait;
use futures::{StreamExt, stream};
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use reqwest::redirect::Policy;
use reqwest::{Client, Method, StatusCode};
use rustc_hash::FxHashSet;
use tokio::time::{Duration, sleep};
use url::Url;

use crate::checker::extract::{extract_links, heading_anchors};
use crate::checker::{LinkCheck, LinkCheckOptions};
use crate::core::constants::{checker, http_status};
use crate::core::error::Result;
use crate::core::types::LinkResult;
use crate::reporting::logging;

/// Default link checker: extracts links from markdown and resolves them
/// over HTTP(S), on the local filesystem, or against the document's own
/// headings.
#[derive(Debug, Clone)]
pub struct HttpLinkChecker {
    user_agent: String,
    concurrency: usize,
}

impl Default for HttpLinkChecker {
    fn default() -> Self {
        Self {
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            concurrency: checker::CONCURRENT_LINKS,
        }
    }
}

#[async_trait]
impl LinkCheck for HttpLinkChecker {
    async fn check_markdown(
        &self,
        markdown: &str,
        options: &LinkCheckOptions,
    ) -> Result<Vec<LinkResult>> {
        let links = extract_links(markdown);
        if links.is_empty() {
            return Ok(Vec::new());
        }

        let client = self.build_client(options)?;
        let anchors = heading_anchors(markdown);

        let results: Vec<LinkResult> = stream::iter(links)
            .map(|link| {
                let client = &client;
                let anchors = &anchors;
                async move { self.check_link(client, anchors, link, options).await }
            })
            .buffered(self.concurrency.max(1))
            .collect()
            .await;

        for result in &results {
            logging::log_link_result(result);
        }

        Ok(results)
    }
}

impl HttpLinkChecker {
    fn build_client(&self, options: &LinkCheckOptions) -> Result<Client> {
        let client = Client::builder()
            .timeout(options.timeout)
            .redirect(Policy::limited(checker::MAX_REDIRECTS))
            .user_agent(self.user_agent.as_str())
            .build()?;
        Ok(client)
    }

    async fn check_link(
        &self,
        client: &Client,
        anchors: &FxHashSet<String>,
        link: String,
        options: &LinkCheckOptions,
    ) -> LinkResult {
        if options.is_ignored(&link) {
            return LinkResult::ignored(link);
        }

        let target = options.apply_replacements(&link);
        if target != link {
            debug!("Rewrote {link} -> {target}");
        }

        if let Some(fragment) = target.strip_prefix('#') {
            return Self::check_anchor(link, fragment, anchors);
        }

        if let Some(address) = target.strip_prefix("mailto:") {
            return Self::check_mailto(link, address);
        }

        let url = match options.base_url.join(&target) {
            Ok(url) => url,
            Err(err) => return LinkResult::unreachable(link, format!("invalid URL: {err}")),
        };

        match url.scheme() {
            "http" | "https" => self.check_http(client, link, url, options).await,
            "file" => Self::check_file(link, &url),
            scheme => {
                debug!("Skipping {link}: unsupported scheme '{scheme}'");
                LinkResult::ignored(link)
            }
        }
    }

    fn check_anchor(link: String, fragment: &str, anchors: &FxHashSet<String>) -> LinkResult {
        if fragment.is_empty() || anchors.contains(&fragment.to_lowercase()) {
            LinkResult::alive(link, http_status::OK)
        } else {
            LinkResult::dead(link, Some(http_status::NOT_FOUND))
        }
    }

    fn check_mailto(link: String, address: &str) -> LinkResult {
        let address = address.split('?').next().unwrap_or_default();
        match address.split_once('@') {
            Some((user, domain)) if !user.is_empty() && !domain.is_empty() => {
                LinkResult::alive(link, http_status::OK)
            }
            _ => LinkResult::dead(link, Some(http_status::BAD_REQUEST)),
        }
    }

    fn check_file(link: String, url: &Url) -> LinkResult {
        match url.to_file_path() {
            Ok(path) if path.exists() => LinkResult::alive(link, http_status::OK),
            _ => LinkResult::dead(link, Some(http_status::BAD_REQUEST)),
        }
    }

    /// HEAD first, falling back to GET when HEAD does not report the link
    /// alive (many servers reject or mishandle HEAD).
    async fn check_http(
        &self,
        client: &Client,
        link: String,
        url: Url,
        options: &LinkCheckOptions,
    ) -> LinkResult {
        let headers = Self::headers_for(url.as_str(), options);

        if let Ok(status) = Self::send(client, Method::HEAD, &url, &headers, options).await
            && options.is_alive_status(status.as_u16())
        {
            return LinkResult::alive(link, status.as_u16());
        }

        match Self::send(client, Method::GET, &url, &headers, options).await {
            Ok(status) if options.is_alive_status(status.as_u16()) => {
                LinkResult::alive(link, status.as_u16())
            }
            Ok(status) => LinkResult::dead(link, Some(status.as_u16())),
            Err(err) => {
                let description = std::error::Error::source(&err)
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| err.to_string());
                LinkResult::unreachable(link, description)
            }
        }
    }

    /// Send one request, retrying 429 responses when configured to.
    async fn send(
        client: &Client,
        method: Method,
        url: &Url,
        headers: &HeaderMap,
        options: &LinkCheckOptions,
    ) -> std::result::Result<StatusCode, reqwest::Error> {
        let mut attempts = 0;

        loop {
            let response = client
                .request(method.clone(), url.clone())
                .headers(headers.clone())
                .send()
                .await?;
            let status = response.status();

            if status != StatusCode::TOO_MANY_REQUESTS
                || !options.retry_on_429
                || attempts >= options.retry_count
            {
                return Ok(status);
            }

            let delay = Self::retry_after(response.headers()).unwrap_or(options.fallback_retry_delay);
            attempts += 1;
            debug!(
                "{method} {url} rate limited, retry {attempts}/{} in {delay:?}",
                options.retry_count
            );
            sleep(delay).await;
        }
    }

    fn retry_after(headers: &HeaderMap) -> Option<Duration> {
        headers
            .get(RETRY_AFTER)?
            .to_str()
            .ok()?
            .trim()
            .parse::<u64>()
            .ok()
            .map(Duration::from_secs)
    }

    fn headers_for(link: &str, options: &LinkCheckOptions) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for rule in options.http_headers.iter().filter(|rule| rule.applies_to(link)) {
            for (name, value) in &rule.headers {
                match (
                    HeaderName::from_bytes(name.as_bytes()),
                    HeaderValue::from_str(value),
                ) {
                    (Ok(name), Ok(value)) => {
                        headers.insert(name, value);
                    }
                    _ => warn!("Skipping invalid HTTP header '{name}'"),
                }
            }
        }
        headers
    }
}
