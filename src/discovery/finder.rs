use ignore::WalkBuilder;
use log::debug;

use crate::core::constants::files;
use crate::core::error::Result;
use crate::core::types::MarkdownFile;
use crate::discovery::path_utils::has_excluded_segment;

use std::path::Path;

pub trait FileFinder {
    fn find_markdown_files(&self, root: &Path) -> Result<Vec<MarkdownFile>>;
}

/// Walks a directory tree collecting markdown files.
///
/// Hidden entries are skipped and ignore files (`.gitignore` and friends)
/// are not consulted, so the result matches a plain `**/*.md` glob minus the
/// excluded directories.
#[derive(Debug, Clone)]
pub struct MarkdownFinder {
    extension: String,
    excluded_dirs: Vec<String>,
}

impl Default for MarkdownFinder {
    fn default() -> Self {
        Self {
            extension: files::MARKDOWN_EXTENSION.to_string(),
            excluded_dirs: files::EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl MarkdownFinder {
    fn is_markdown(&self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some(self.extension.as_str())
    }
}

impl FileFinder for MarkdownFinder {
    fn find_markdown_files(&self, root: &Path) -> Result<Vec<MarkdownFile>> {
        let excluded = self.excluded_dirs.clone();

        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .hidden(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                entry.depth() == 0
                    || !entry.file_type().is_some_and(|ft| ft.is_dir())
                    || !excluded
                        .iter()
                        .any(|dir| entry.file_name().to_str() == Some(dir.as_str()))
            });

        let mut result = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_some_and(|ft| ft.is_file()) || !self.is_markdown(path) {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(path);
            if has_excluded_segment(relative, &self.excluded_dirs) {
                continue;
            }

            debug!("Discovered {}", path.display());
            result.push(MarkdownFile::new(path));
        }

        Ok(result)
    }
}
