//! Archive creation reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of an archive creation operation.
///
/// # Examples
///
/// ```
/// use ziptask_core::creation::ArchiveReport;
///
/// let mut report = ArchiveReport::default();
/// report.bytes_read = 1000;
/// report.archive_size = 250;
///
/// assert_eq!(report.compression_percentage(), 75.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveReport {
    /// Absolute path of the written archive.
    pub archive_path: PathBuf,

    /// Number of files added.
    pub files_added: usize,

    /// Number of directory entries added.
    pub directories_added: usize,

    /// Total uncompressed bytes read from the source.
    pub bytes_read: u64,

    /// Size of the finished archive on disk.
    pub archive_size: u64,

    /// Number of entries skipped (unfollowed symlinks).
    pub entries_skipped: usize,

    /// Duration of the operation.
    pub duration: Duration,

    /// Warnings generated during creation.
    pub warnings: Vec<String>,
}

impl ArchiveReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the space saved as a percentage of the bytes read.
    ///
    /// Returns 0.0 when nothing was read or the archive is larger than its
    /// contents.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_read == 0 {
            return 0.0;
        }
        let saved = self.bytes_read.saturating_sub(self.archive_size);
        (saved as f64 / self.bytes_read as f64) * 100.0
    }

    /// Returns total number of entries written.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.files_added + self.directories_added
    }
}
