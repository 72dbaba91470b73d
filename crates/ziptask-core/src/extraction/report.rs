//! Extraction operation reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of an archive extraction operation.
///
/// Contains statistics about the extraction process.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Directory the archive was expanded into.
    pub extraction_root: PathBuf,

    /// Number of files written.
    pub files_extracted: usize,

    /// Number of directory entries materialized.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Paths of the written files, in archive order.
    pub extracted_files: Vec<PathBuf>,

    /// Duration of the extraction operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of items processed.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }
}
