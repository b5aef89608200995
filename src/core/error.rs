use std::fmt;

/// Error types for mdlinkcheck operations
#[derive(Debug)]
pub enum LinkCheckError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// JSON parsing error
    JsonParsing(serde_json::Error),

    /// Regex compilation error
    Regex(regex::Error),

    /// HTTP client error
    Http(reqwest::Error),

    /// File walking/ignore error
    FileWalking(ignore::Error),

    /// Markdown file discovery error
    Discovery(String),

    /// The link checker could not process a document
    Checker(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// A file contains dead links
    BrokenLinks { file: String, count: usize },
}

impl fmt::Display for LinkCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkCheckError::Io(err) => write!(f, "IO error: {err}"),
            LinkCheckError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LinkCheckError::JsonParsing(err) => write!(f, "JSON parsing error: {err}"),
            LinkCheckError::Regex(err) => write!(f, "Regex error: {err}"),
            LinkCheckError::Http(err) => write!(f, "HTTP error: {err}"),
            LinkCheckError::FileWalking(err) => write!(f, "File walking error: {err}"),
            LinkCheckError::Discovery(msg) => write!(f, "Discovery error: {msg}"),
            LinkCheckError::Checker(msg) => write!(f, "Link checker error: {msg}"),
            LinkCheckError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            LinkCheckError::BrokenLinks { file, count } => {
                write!(f, "{count} broken links found in {file}")
            }
        }
    }
}

impl std::error::Error for LinkCheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkCheckError::Io(err) => Some(err),
            LinkCheckError::JsonParsing(err) => Some(err),
            LinkCheckError::Regex(err) => Some(err),
            LinkCheckError::Http(err) => Some(err),
            LinkCheckError::FileWalking(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LinkCheckError {
    fn from(err: std::io::Error) -> Self {
        LinkCheckError::Io(err)
    }
}

impl From<serde_json::Error> for LinkCheckError {
    fn from(err: serde_json::Error) -> Self {
        LinkCheckError::JsonParsing(err)
    }
}

impl From<regex::Error> for LinkCheckError {
    fn from(err: regex::Error) -> Self {
        LinkCheckError::Regex(err)
    }
}

impl From<reqwest::Error> for LinkCheckError {
    fn from(err: reqwest::Error) -> Self {
        LinkCheckError::Http(err)
    }
}

impl From<ignore::Error> for LinkCheckError {
    fn from(err: ignore::Error) -> Self {
        LinkCheckError::FileWalking(err)
    }
}

/// Type alias for Results using LinkCheckError
pub type Result<T> = std::result::Result<T, LinkCheckError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = LinkCheckError::Config("Invalid timeout".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: Invalid timeout"
        );

        let broken = LinkCheckError::BrokenLinks {
            file: "docs/README.md".to_string(),
            count: 2,
        };
        assert_eq!(format!("{broken}"), "2 broken links found in docs/README.md");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let error = LinkCheckError::from(io_error);

        assert!(matches!(error, LinkCheckError::Io(_)));
        assert!(format!("{error}").starts_with("IO error:"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid").unwrap_err();
        let error = LinkCheckError::from(json_error);

        assert!(matches!(error, LinkCheckError::JsonParsing(_)));
        assert!(error.source().is_some());
    }

    #[test]
    #[allow(clippy::invalid_regex)]
    fn test_error_from_regex() {
        let regex_error = regex::Regex::new("[invalid").unwrap_err();
        let error = LinkCheckError::from(regex_error);

        assert!(matches!(error, LinkCheckError::Regex(_)));
        assert!(format!("{error}").contains("Regex error:"));
    }

    #[test]
    fn test_error_from_ignore() {
        let ignore_error = ignore::WalkBuilder::new("/non/existent/path/12345")
            .build()
            .next()
            .unwrap()
            .unwrap_err();
        let error = LinkCheckError::from(ignore_error);

        assert!(matches!(error, LinkCheckError::FileWalking(_)));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_no_source_variants() {
        let errors_without_source = vec![
            LinkCheckError::Config("test".to_string()),
            LinkCheckError::Discovery("test".to_string()),
            LinkCheckError::Checker("test".to_string()),
            LinkCheckError::InvalidArgument("test".to_string()),
            LinkCheckError::BrokenLinks {
                file: "test.md".to_string(),
                count: 1,
            },
        ];

        for error in errors_without_source {
            assert!(error.source().is_none());
            assert!(!format!("{error}").is_empty());
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LinkCheckError>();
    }
}
