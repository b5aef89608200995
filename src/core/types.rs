use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::constants::display;
use crate::discovery::path_utils::relative_to_cwd;

/// Outcome of checking a single link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Alive,
    Dead,
    Ignored,
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LinkStatus::Alive => "alive",
            LinkStatus::Dead => "dead",
            LinkStatus::Ignored => "ignored",
        };
        f.write_str(label)
    }
}

/// Result of checking one hyperlink found in a markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResult {
    /// The link as written in the document
    pub link: String,
    pub status: LinkStatus,
    /// HTTP status code, or its local equivalent for file and anchor links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Transport error description when no response was received
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl LinkResult {
    pub fn alive(link: impl Into<String>, status_code: u16) -> Self {
        Self {
            link: link.into(),
            status: LinkStatus::Alive,
            status_code: Some(status_code),
            err: None,
        }
    }

    pub fn dead(link: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            link: link.into(),
            status: LinkStatus::Dead,
            status_code,
            err: None,
        }
    }

    /// Dead link that never produced a response (timeout, DNS, TLS, ...).
    pub fn unreachable(link: impl Into<String>, err: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            status: LinkStatus::Dead,
            status_code: None,
            err: Some(err.into()),
        }
    }

    pub fn ignored(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            status: LinkStatus::Ignored,
            status_code: None,
            err: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.status == LinkStatus::Dead
    }

    /// Status code for display, falling back to a generic marker.
    pub fn status_label(&self) -> String {
        self.status_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| display::MISSING_STATUS_CODE.to_string())
    }
}

impl fmt::Display for LinkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.link, self.status_label())
    }
}

/// A markdown file discovered under the scanned root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkdownFile {
    path: PathBuf,
}

impl MarkdownFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the file, used as the base for relative links.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("/"))
    }

    /// Path relative to the working directory when possible.
    pub fn display_name(&self) -> String {
        relative_to_cwd(&self.path)
    }
}

impl fmt::Display for MarkdownFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}
