//! Error types for zip and unzip task operations.

use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

/// Result type alias using `TaskError`.
pub type Result<T> = std::result::Result<T, TaskError>;

/// Coarse classification of a [`TaskError`].
///
/// Hosts only distinguish a handful of failure classes; every error variant
/// maps onto exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The source path cannot be archived.
    InvalidSource,
    /// Filesystem read or write failure.
    Io,
    /// Archive contents are unreadable or malformed.
    CorruptArchive,
    /// The caller supplied invalid inputs or configuration.
    Usage,
}

impl ErrorCategory {
    /// Returns a stable machine-readable code for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use ziptask_core::ErrorCategory;
    ///
    /// assert_eq!(ErrorCategory::CorruptArchive.as_str(), "corrupt_archive");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidSource => "invalid_source",
            Self::Io => "io",
            Self::CorruptArchive => "corrupt_archive",
            Self::Usage => "usage",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while running a zip or unzip task.
#[derive(Error, Debug)]
pub enum TaskError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source path is missing or is neither a regular file nor a directory.
    #[error("invalid source {path}: {reason}")]
    InvalidSource {
        /// The offending source path.
        path: PathBuf,
        /// Why the source was rejected.
        reason: String,
    },

    /// Archive is corrupted or not a ZIP archive.
    #[error("corrupt archive: {0}")]
    CorruptArchive(String),

    /// Archive entry name would resolve outside the extraction root.
    #[error("unsafe entry name in archive: {name}")]
    UnsafeEntry {
        /// Entry name as stored in the archive.
        name: String,
    },

    /// A requested entry is not present in the archive.
    #[error("entry not found in archive: {name}")]
    EntryNotFound {
        /// The requested entry name.
        name: String,
    },

    /// Configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No task is registered under the given name.
    #[error("unknown task: {name}")]
    UnknownTask {
        /// The requested task name.
        name: String,
    },

    /// Task inputs do not match the task's schema.
    #[error("invalid inputs for task {task}: {reason}")]
    InvalidInputs {
        /// Name of the task.
        task: String,
        /// Deserialization failure description.
        reason: String,
    },
}

impl From<ZipError> for TaskError {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::Io(io) => Self::Io(io),
            other => Self::CorruptArchive(other.to_string()),
        }
    }
}

impl TaskError {
    /// Builds an [`TaskError::InvalidSource`] error.
    pub fn invalid_source(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns the category this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use ziptask_core::ErrorCategory;
    /// use ziptask_core::TaskError;
    ///
    /// let err = TaskError::CorruptArchive("bad central directory".to_string());
    /// assert_eq!(err.category(), ErrorCategory::CorruptArchive);
    ///
    /// let err = TaskError::UnsafeEntry {
    ///     name: "../etc/passwd".to_string(),
    /// };
    /// assert_eq!(err.category(), ErrorCategory::CorruptArchive);
    /// ```
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::Io,
            Self::InvalidSource { .. } => ErrorCategory::InvalidSource,
            Self::CorruptArchive(_) | Self::UnsafeEntry { .. } => ErrorCategory::CorruptArchive,
            Self::EntryNotFound { .. }
            | Self::InvalidConfig(_)
            | Self::UnknownTask { .. }
            | Self::InvalidInputs { .. } => ErrorCategory::Usage,
        }
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use ziptask_core::TaskError;
    ///
    /// let err = TaskError::CorruptArchive("bad header".to_string());
    /// assert_eq!(err.context(), Some("bad header"));
    ///
    /// let err = TaskError::UnknownTask {
    ///     name: "zap".to_string(),
    /// };
    /// assert_eq!(err.context(), None);
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::CorruptArchive(msg) | Self::InvalidConfig(msg) => Some(msg),
            Self::InvalidSource { reason, .. } | Self::InvalidInputs { reason, .. } => {
                Some(reason)
            }
            _ => None,
        }
    }
}
