//! Markdown file discovery
//!
//! This module handles walking the documentation tree and managing
//! file path operations for display and link resolution.

pub mod finder;
pub mod path_utils;

// Re-export commonly used items
pub use finder::{FileFinder, MarkdownFinder};
pub use path_utils::resolve_root;
