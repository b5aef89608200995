use std::path::{Component, Path, PathBuf};

use crate::core::error::{LinkCheckError, Result};

/// Resolve the scan root into an absolute, canonical directory path.
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let canonical = root.canonicalize().map_err(|e| {
        LinkCheckError::Discovery(format!("Cannot access '{}': {e}", root.display()))
    })?;

    if !canonical.is_dir() {
        return Err(LinkCheckError::Discovery(format!(
            "'{}' is not a directory",
            root.display()
        )));
    }

    Ok(canonical)
}

/// Render `path` relative to the current working directory when it lies
/// below it, otherwise as-is.
pub fn relative_to_cwd(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| relative_to(path, &cwd))
        .unwrap_or_else(|| path.display().to_string())
}

fn relative_to(path: &Path, base: &Path) -> Option<String> {
    path.strip_prefix(base)
        .ok()
        .filter(|relative| !relative.as_os_str().is_empty())
        .map(|relative| relative.display().to_string())
}

/// True when any directory component of `path` is one of `excluded`.
pub fn has_excluded_segment(path: &Path, excluded: &[String]) -> bool {
    path.components().any(|component| match component {
        Component::Normal(name) => excluded
            .iter()
            .any(|dir| name.to_str() == Some(dir.as_str())),
        _ => false,
    })
}
