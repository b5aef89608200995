/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Configuration file location and fallback configuration values
pub mod config {
    /// Name of the configuration file looked up in the scanned root
    pub const CONFIG_FILE_NAME: &str = ".markdown-link-check.json";
    /// Links under the internal domain are never reachable from CI
    pub const INTERNAL_DOMAIN_PATTERN: &str = "^https://jkradio.internal/";
    /// Fallback request timeout
    pub const DEFAULT_TIMEOUT: &str = "20s";
    /// Fallback setting for retrying rate-limited requests
    pub const DEFAULT_RETRY_ON_429: bool = true;
    /// Fallback number of retries for rate-limited requests
    pub const DEFAULT_RETRY_COUNT: u32 = 3;
}

/// Defaults the link checker applies when the configuration omits a field
pub mod checker {
    /// Request timeout
    pub const TIMEOUT: &str = "10s";
    /// Whether 429 responses are retried
    pub const RETRY_ON_429: bool = false;
    /// Number of retries for 429 responses
    pub const RETRY_COUNT: u32 = 2;
    /// Delay before retrying a 429 response without `Retry-After`
    pub const FALLBACK_RETRY_DELAY: &str = "60s";
    /// Status codes considered alive
    pub const ALIVE_STATUS_CODES: [u16; 2] = [200, 206];
    /// Maximum number of redirects followed per request
    pub const MAX_REDIRECTS: usize = 10;
    /// Links resolved concurrently within a single document
    pub const CONCURRENT_LINKS: usize = 2;
    /// Token expanded to the base URL inside replacement strings
    pub const BASE_URL_TOKEN: &str = "{{BASEURL}}";
}

/// HTTP-like status codes reported for non-HTTP links
pub mod http_status {
    /// Local target exists
    pub const OK: u16 = 200;
    /// Local file is missing
    pub const BAD_REQUEST: u16 = 400;
    /// In-document anchor is missing
    pub const NOT_FOUND: u16 = 404;
}

/// File discovery constants
pub mod files {
    /// Extension of the files that get checked
    pub const MARKDOWN_EXTENSION: &str = "md";
    /// Dependency-manager directories that are never scanned
    pub const EXCLUDED_DIRS: [&str; 1] = ["node_modules"];
}

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Display and formatting constants
pub mod display {
    /// Emoji for success status
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for error status
    pub const ERROR_EMOJI: &str = "❌";
    /// Shown instead of a status code when the request never got a response
    pub const MISSING_STATUS_CODE: &str = "Error";
}
