//! Configuration for archive creation.

use crate::Result;
use crate::TaskError;

/// Default DEFLATE compression level.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Highest accepted compression level.
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// Configuration for creating a ZIP archive from a file or directory.
///
/// Defaults archive everything beneath the source: hidden files are kept,
/// symlinks are followed and no patterns are excluded.
///
/// # Examples
///
/// ```
/// use ziptask_core::creation::ArchiveConfig;
///
/// let config = ArchiveConfig::default()
///     .with_compression_level(9)
///     .with_exclude_patterns(vec!["*.log".to_string()]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Compression level, 0 (stored) to 9 (best).
    ///
    /// Default: `6`.
    pub compression_level: u8,

    /// Include files and directories whose name starts with '.'.
    ///
    /// Default: `true`.
    pub include_hidden: bool,

    /// Follow symlinks found while walking a directory source.
    ///
    /// When `false`, symlinks are skipped and reported as warnings. When
    /// `true`, a link to a directory that contains the source (such as
    /// `loop -> ..`) is still skipped with a warning instead of pulling the
    /// parent tree into the archive. A dangling link fails the walk.
    ///
    /// Default: `true`.
    pub follow_symlinks: bool,

    /// Record Unix permission bits of source files in the archive.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,

    /// Patterns excluded from directory sources.
    ///
    /// Supports exact component names, `*.ext` and `prefix*`.
    ///
    /// Default: empty.
    pub exclude_patterns: Vec<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            include_hidden: true,
            follow_symlinks: true,
            preserve_permissions: true,
            exclude_patterns: Vec::new(),
        }
    }
}

impl ArchiveConfig {
    /// Creates a new `ArchiveConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level. Range is checked by [`Self::validate`].
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = level;
        self
    }

    /// Sets whether to include hidden files.
    #[must_use]
    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Sets whether to follow symlinks.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets whether to preserve permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Sets the exclude patterns.
    #[must_use]
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidConfig`] if the compression level is
    /// above 9 or an exclude pattern is empty.
    pub fn validate(&self) -> Result<()> {
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(TaskError::InvalidConfig(format!(
                "compression level must be 0-{MAX_COMPRESSION_LEVEL}, got {}",
                self.compression_level
            )));
        }
        if self.exclude_patterns.iter().any(String::is_empty) {
            return Err(TaskError::InvalidConfig(
                "exclude patterns must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_archive_everything() {
        let config = ArchiveConfig::default();
        assert_eq!(config.compression_level, 6);
        assert!(config.include_hidden);
        assert!(config.follow_symlinks);
        assert!(config.preserve_permissions);
        assert!(config.exclude_patterns.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = ArchiveConfig::new()
            .with_compression_level(0)
            .with_include_hidden(false)
            .with_follow_symlinks(false)
            .with_preserve_permissions(false)
            .with_exclude_patterns(vec!["*.tmp".to_string()]);

        assert_eq!(config.compression_level, 0);
        assert!(!config.include_hidden);
        assert!(!config.follow_symlinks);
        assert!(!config.preserve_permissions);
        assert_eq!(config.exclude_patterns, vec!["*.tmp"]);
    }

    #[test]
    fn test_validate_rejects_level_ten() {
        let config = ArchiveConfig::default().with_compression_level(10);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, TaskError::InvalidConfig(_)));
        assert!(err.to_string().contains("got 10"));
    }

    #[test]
    fn test_validate_accepts_full_range() {
        for level in 0..=9 {
            assert!(
                ArchiveConfig::default()
                    .with_compression_level(level)
                    .validate()
                    .is_ok()
            );
        }
    }

    #[test]
    fn test_validate_rejects_empty_pattern() {
        let config = ArchiveConfig::default().with_exclude_patterns(vec![String::new()]);
        assert!(config.validate().is_err());
    }
}
