//! Archive integrity verification.

use std::io;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use serde::Serialize;
use zip::ZipArchive;

use crate::ErrorCategory;
use crate::Result;
use crate::TaskError;
use crate::copy::CopyBuffer;
use crate::copy::copy_entry;
use crate::extraction::zip::open_zip;

/// An entry that could not be read back intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
    /// Entry name as stored in the archive.
    pub name: String,

    /// What went wrong.
    pub reason: String,
}

/// Outcome of reading every file entry of an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// File entries that were read, including failed ones.
    pub entries_checked: usize,

    /// Uncompressed bytes read from entries that passed.
    pub bytes_checked: u64,

    /// Entries whose data or header is damaged.
    pub failures: Vec<EntryFailure>,
}

impl VerificationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when no entry failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Reads every file entry of a ZIP archive and checks it against its CRC-32.
///
/// Directories are skipped. Damaged entries (bad CRC, undecodable data,
/// unreadable local header, unsafe name) are collected in the report
/// instead of aborting, so one run lists every broken entry. Nothing is
/// written to disk.
///
/// # Errors
///
/// Returns an error if:
/// - The archive cannot be opened
/// - The central directory cannot be parsed
/// - Reading the archive file itself fails
///
/// # Examples
///
/// ```no_run
/// use ziptask_core::inspection::verify_zip;
///
/// let report = verify_zip("bundle.zip")?;
/// for failure in &report.failures {
///     eprintln!("{}: {}", failure.name, failure.reason);
/// }
/// # Ok::<(), ziptask_core::TaskError>(())
/// ```
pub fn verify_zip<P: AsRef<Path>>(archive_path: P) -> Result<VerificationReport> {
    let archive_path = archive_path.as_ref();
    let mut archive = open_zip(archive_path)?;
    let mut report = VerificationReport::new();
    let mut buffer = CopyBuffer::new();

    for index in 0..archive.len() {
        match verify_entry(&mut archive, index, &mut buffer) {
            Ok(None) => {}
            Ok(Some(bytes)) => {
                report.entries_checked += 1;
                report.bytes_checked += bytes;
            }
            Err(err) if err.category() == ErrorCategory::CorruptArchive => {
                let name = archive
                    .name_for_index(index)
                    .map_or_else(|| format!("#{index}"), str::to_string);
                let reason = err.context().map_or_else(|| err.to_string(), str::to_string);
                tracing::warn!(entry = %name, %reason, "entry failed verification");

                report.entries_checked += 1;
                report.failures.push(EntryFailure { name, reason });
            }
            Err(err) => return Err(err),
        }
    }

    tracing::info!(
        archive = %archive_path.display(),
        entries = report.entries_checked,
        failures = report.failures.len(),
        "archive verified"
    );

    Ok(report)
}

/// Reads one entry to the end. Returns `None` for directories.
fn verify_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    buffer: &mut CopyBuffer,
) -> Result<Option<u64>> {
    let mut entry = archive.by_index(index)?;
    if entry.is_dir() {
        return Ok(None);
    }

    let name = entry.name().to_string();
    if entry.enclosed_name().is_none() {
        return Err(TaskError::UnsafeEntry { name });
    }

    copy_entry(&name, &mut entry, &mut io::sink(), buffer).map(Some)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::ZipTestBuilder;
    use crate::test_utils::corrupt_bytes;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_verify_intact_archive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ok.zip");
        fs::write(
            &path,
            ZipTestBuilder::new()
                .add_directory("docs/")
                .add_file("docs/readme.md", b"hello")
                .add_deflated_file("big.txt", &[b'q'; 4096])
                .build(),
        )
        .unwrap();

        let report = verify_zip(&path).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.entries_checked, 2);
        assert_eq!(report.bytes_checked, 5 + 4096);
    }

    #[test]
    fn test_verify_reports_crc_mismatch() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.zip");
        let mut data = ZipTestBuilder::new()
            .add_file("good.txt", b"untouched content")
            .add_file("data.txt", b"payload that gets flipped")
            .build();
        corrupt_bytes(&mut data, b"payload that gets flipped");
        fs::write(&path, data).unwrap();

        let report = verify_zip(&path).unwrap();

        assert!(!report.is_valid());
        assert_eq!(report.entries_checked, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "data.txt");
        assert!(report.failures[0].reason.contains("data.txt"));
        assert_eq!(report.bytes_checked, 17);
    }

    #[test]
    fn test_verify_reports_unsafe_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("evil.zip");
        fs::write(
            &path,
            ZipTestBuilder::new()
                .add_file("../escape.txt", b"evil")
                .build(),
        )
        .unwrap();

        let report = verify_zip(&path).unwrap();

        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].reason.contains("unsafe entry name"));
    }

    #[test]
    fn test_verify_not_a_zip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bogus.zip");
        fs::write(&path, b"plain text").unwrap();

        assert!(matches!(
            verify_zip(&path),
            Err(TaskError::CorruptArchive(_))
        ));
    }
}
