//! Path filtering and entry naming for archive creation.

use crate::Result;
use crate::TaskError;
use crate::creation::config::ArchiveConfig;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Checks if a path relative to the source root should be skipped.
///
/// A path is skipped if:
/// - Any component is hidden and `include_hidden` is false
/// - It matches an exclude pattern
///
/// The empty path (the source root itself) is never skipped.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ziptask_core::creation::ArchiveConfig;
/// use ziptask_core::creation::filters;
///
/// let config = ArchiveConfig::default().with_include_hidden(false);
/// assert!(filters::should_skip(Path::new(".env"), &config));
/// assert!(!filters::should_skip(Path::new("main.rs"), &config));
/// ```
#[must_use]
pub fn should_skip(relative: &Path, config: &ArchiveConfig) -> bool {
    if relative.as_os_str().is_empty() {
        return false;
    }

    if !config.include_hidden
        && relative
            .components()
            .any(|c| is_hidden(Path::new(c.as_os_str())))
    {
        return true;
    }

    config
        .exclude_patterns
        .iter()
        .any(|pattern| matches_pattern(relative, pattern))
}

/// Checks if a path's file name starts with '.'.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ziptask_core::creation::filters;
///
/// assert!(filters::is_hidden(Path::new("dir/.hidden")));
/// assert!(!filters::is_hidden(Path::new("visible.txt")));
/// ```
#[must_use]
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// Matches any component of `path` against a glob-style pattern.
///
/// Supports exact names, `*.ext` suffix wildcards and `prefix*` wildcards.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ziptask_core::creation::filters;
///
/// assert!(filters::matches_pattern(Path::new("src/.git/config"), ".git"));
/// assert!(filters::matches_pattern(Path::new("logs/app.log"), "*.log"));
/// assert!(!filters::matches_pattern(Path::new("main.rs"), "temp*"));
/// ```
#[must_use]
pub fn matches_pattern(path: &Path, pattern: &str) -> bool {
    path.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|s| pattern_matches(s, pattern))
    })
}

fn pattern_matches(s: &str, pattern: &str) -> bool {
    if pattern == s {
        return true;
    }

    if let Some(prefix) = pattern.strip_suffix('*') {
        return s.starts_with(prefix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        return s.ends_with(suffix);
    }

    false
}

/// Computes a path relative to the directory being archived.
///
/// # Errors
///
/// Returns an error if `path` is not under `root`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ziptask_core::creation::filters;
///
/// let rel = filters::relative_to_root(
///     Path::new("/home/user/project/src/main.rs"),
///     Path::new("/home/user/project"),
/// )
/// .unwrap();
/// assert_eq!(rel, Path::new("src/main.rs"));
/// ```
pub fn relative_to_root(path: &Path, root: &Path) -> Result<PathBuf> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .map_err(|_| {
            TaskError::Io(std::io::Error::other(format!(
                "path {} is not under root directory {}",
                path.display(),
                root.display()
            )))
        })
}

/// Converts a relative path into a ZIP entry name.
///
/// ZIP entry names use forward slashes on every platform. Only normal
/// components are kept.
///
/// # Errors
///
/// Returns an error if a component is not valid UTF-8.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ziptask_core::creation::filters;
///
/// let name = filters::zip_entry_name(Path::new("a/b.txt")).unwrap();
/// assert_eq!(name, "a/b.txt");
/// ```
pub fn zip_entry_name(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| {
                TaskError::Io(std::io::Error::other(format!(
                    "path is not valid UTF-8: {}",
                    relative.display()
                )))
            })?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}
