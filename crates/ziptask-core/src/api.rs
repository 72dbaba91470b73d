//! High-level public API for archiving and extracting.
//!
//! These functions resolve destinations against a [`TaskContext`] and
//! delegate to the creation and extraction modules.

use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::TaskContext;
use crate::creation::ArchiveConfig;
use crate::creation::ArchiveReport;
use crate::creation::zip::create_zip;
use crate::extraction::ExtractConfig;
use crate::extraction::ExtractionReport;
use crate::extraction::zip::extract_zip;
use crate::inspection::ArchiveManifest;
use crate::inspection::VerificationReport;
use crate::inspection::list_zip;
use crate::inspection::verify_zip;
use crate::types::SourcePath;

/// Archives a file or directory into `<output_dir>/<base name>.zip`.
///
/// When `output_dir` is `None` the archive is written to the session
/// directory of `ctx`. Returns the absolute path of the archive.
///
/// # Errors
///
/// Returns an error if:
/// - The source does not exist or is not a file or directory
/// - The archive cannot be written
///
/// # Examples
///
/// ```no_run
/// use ziptask_core::TaskContext;
/// use ziptask_core::archive;
///
/// let ctx = TaskContext::new("/sess/42");
/// let zip = archive("/tmp/report.pdf", None::<&str>, &ctx)?;
/// assert_eq!(zip, std::path::Path::new("/sess/42/report.pdf.zip"));
/// # Ok::<(), ziptask_core::TaskError>(())
/// ```
pub fn archive<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    output_dir: Option<Q>,
    ctx: &TaskContext,
) -> Result<PathBuf> {
    archive_with_config(source, output_dir, ctx, &ArchiveConfig::default())
        .map(|report| report.archive_path)
}

/// Archives a file or directory with explicit options.
///
/// Same as [`archive`] but returns the full [`ArchiveReport`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the source is
/// rejected, or writing fails.
pub fn archive_with_config<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    output_dir: Option<Q>,
    ctx: &TaskContext,
    config: &ArchiveConfig,
) -> Result<ArchiveReport> {
    config.validate()?;
    let source = SourcePath::new(source.as_ref())?;
    let dest_dir = std::path::absolute(ctx.resolve_output(output_dir))?;
    let archive_path = dest_dir.join(source.archive_file_name());

    create_zip(&source, &archive_path, config)
}

/// Extracts an archive into `output_dir`, or the session directory.
///
/// Returns the destination directory as resolved, including for an empty
/// archive.
///
/// # Errors
///
/// Returns an error if:
/// - The archive cannot be opened or is not a ZIP archive
/// - An entry is corrupt or would escape the destination
/// - Writing fails
///
/// # Examples
///
/// ```no_run
/// use ziptask_core::TaskContext;
/// use ziptask_core::extract;
///
/// let ctx = TaskContext::new("/sess/42");
/// let dir = extract("/tmp/bundle.zip", Some("/tmp/bundle"), &ctx)?;
/// println!("extracted into {}", dir.display());
/// # Ok::<(), ziptask_core::TaskError>(())
/// ```
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Option<Q>,
    ctx: &TaskContext,
) -> Result<PathBuf> {
    extract_with_config(archive_path, output_dir, ctx, &ExtractConfig::default())
        .map(|report| report.extraction_root)
}

/// Extracts an archive with explicit options.
///
/// Same as [`extract`] but returns the full [`ExtractionReport`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the archive cannot be
/// read, a selected entry is missing, or writing fails.
pub fn extract_with_config<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Option<Q>,
    ctx: &TaskContext,
    config: &ExtractConfig,
) -> Result<ExtractionReport> {
    let dest = ctx.resolve_output(output_dir);
    extract_zip(archive_path.as_ref(), &dest, config)
}

/// Lists the entries of an archive without extracting it.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or parsed.
pub fn list_archive<P: AsRef<Path>>(archive_path: P) -> Result<ArchiveManifest> {
    list_zip(archive_path)
}

/// Reads every entry of an archive and reports the damaged ones.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened or its central
/// directory cannot be parsed. Damaged entries are not errors; they are
/// listed in the returned report.
pub fn verify_archive<P: AsRef<Path>>(archive_path: P) -> Result<VerificationReport> {
    verify_zip(archive_path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::TaskError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_archive_defaults_to_session_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("report.pdf");
        fs::write(&source, b"%PDF").unwrap();
        let session = temp.path().join("sess/42");
        let ctx = TaskContext::new(&session);

        let zip = archive(&source, None::<&Path>, &ctx).unwrap();

        assert_eq!(zip, session.join("report.pdf.zip"));
        assert!(zip.is_absolute());
        assert_eq!(list_archive(&zip).unwrap().entries[0].name, "report.pdf");
    }

    #[test]
    fn test_archive_explicit_output_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("photos");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("cat.jpg"), b"meow").unwrap();
        let out = temp.path().join("out");
        let ctx = TaskContext::new(temp.path().join("unused"));

        let zip = archive(&source, Some(&out), &ctx).unwrap();

        assert_eq!(zip, out.join("photos.zip"));
        assert!(!temp.path().join("unused").exists());
    }

    #[test]
    fn test_archive_missing_source_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let ctx = TaskContext::new(temp.path());

        let err = archive(temp.path().join("ghost.txt"), None::<&Path>, &ctx).unwrap_err();

        assert!(matches!(err, TaskError::InvalidSource { .. }));
        assert!(!temp.path().join("ghost.txt.zip").exists());
    }

    #[test]
    fn test_extract_defaults_to_session_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("data.txt");
        fs::write(&source, b"payload").unwrap();
        let ctx = TaskContext::new(temp.path().join("session"));
        let zip = archive(&source, Some(temp.path()), &ctx).unwrap();

        let dir = extract(&zip, None::<&Path>, &ctx).unwrap();

        assert_eq!(dir, temp.path().join("session"));
        assert_eq!(fs::read(dir.join("data.txt")).unwrap(), b"payload");
    }

    #[test]
    fn test_archive_with_config_rejects_bad_level() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.txt");
        fs::write(&source, b"a").unwrap();
        let ctx = TaskContext::new(temp.path());
        let config = ArchiveConfig::default().with_compression_level(10);

        let err = archive_with_config(&source, None::<&Path>, &ctx, &config).unwrap_err();

        assert!(matches!(err, TaskError::InvalidConfig(_)));
    }

    #[test]
    fn test_verify_archive_after_archive() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("notes");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("one.txt"), b"first").unwrap();
        fs::write(source.join("two.txt"), b"second").unwrap();
        let ctx = TaskContext::new(temp.path());
        let zip = archive(&source, None::<&Path>, &ctx).unwrap();

        let report = verify_archive(&zip).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.entries_checked, 2);
        assert_eq!(report.bytes_checked, 11);
    }
}
