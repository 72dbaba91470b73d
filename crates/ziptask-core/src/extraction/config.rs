//! Configuration for archive extraction.

use crate::Result;
use crate::TaskError;

/// Configuration for expanding a ZIP archive.
///
/// # Examples
///
/// ```
/// use ziptask_core::extraction::ExtractConfig;
///
/// // Expand everything (the default)
/// let all = ExtractConfig::default();
/// assert!(all.entries.is_none());
///
/// // Only two entries
/// let some = ExtractConfig::default()
///     .with_entries(vec!["docs/readme.md".to_string(), "logo.png".to_string()]);
/// assert!(some.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Entry names to extract. `None` extracts every entry.
    ///
    /// Backslashes are treated as forward slashes when looking entries up.
    ///
    /// Default: `None`.
    pub entries: Option<Vec<String>>,

    /// Apply Unix permission bits stored in the archive to extracted files.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            entries: None,
            preserve_permissions: true,
        }
    }
}

impl ExtractConfig {
    /// Creates a new `ExtractConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts extraction to the named entries.
    #[must_use]
    pub fn with_entries(mut self, entries: Vec<String>) -> Self {
        self.entries = Some(entries);
        self
    }

    /// Sets whether to apply stored permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidConfig`] if an entry selection is given
    /// but empty or contains an empty name.
    pub fn validate(&self) -> Result<()> {
        if let Some(entries) = &self.entries {
            if entries.is_empty() {
                return Err(TaskError::InvalidConfig(
                    "at least one entry must be selected".to_string(),
                ));
            }
            if entries.iter().any(String::is_empty) {
                return Err(TaskError::InvalidConfig(
                    "entry names must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
