//! ZIP archive creation.

use crate::Result;
use crate::TaskError;
use crate::creation::config::ArchiveConfig;
use crate::creation::filters;
use crate::creation::report::ArchiveReport;
use crate::creation::walker::EntryKind;
use crate::creation::walker::SourceEntry;
use crate::creation::walker::collect_entries;
use crate::types::SourcePath;
use std::fs;
use std::fs::File;
use std::io;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes `source` into a new ZIP archive at `archive_path`.
///
/// The parent directory of `archive_path` is created if missing. The
/// archive is staged in a temporary file next to `archive_path` and renamed
/// over it only once every entry is written, so a failed run leaves an
/// existing archive untouched. When the archive lies inside a directory
/// source it is left out of the walk.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use ziptask_core::creation::ArchiveConfig;
/// use ziptask_core::creation::zip::create_zip;
/// use ziptask_core::types::SourcePath;
///
/// let source = SourcePath::new("src")?;
/// let report = create_zip(&source, Path::new("/tmp/src.zip"), &ArchiveConfig::default())?;
/// println!("Added {} files", report.files_added);
/// # Ok::<(), ziptask_core::TaskError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The archive file cannot be created
/// - A source entry cannot be read
/// - Writing the archive fails
pub fn create_zip(
    source: &SourcePath,
    archive_path: &Path,
    config: &ArchiveConfig,
) -> Result<ArchiveReport> {
    config.validate()?;

    if let Some(parent) = archive_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let start = Instant::now();
    let entries = collect_entries(source, config, Some(archive_path))?;

    let mut staged = stage_archive(archive_path)?;
    let mut report = write_entries(staged.as_file_mut(), &entries, config)?;
    staged
        .persist(archive_path)
        .map_err(|e| TaskError::Io(e.error))?;

    report.archive_path = archive_path.to_path_buf();
    report.archive_size = fs::metadata(archive_path)?.len();
    report.duration = start.elapsed();

    tracing::info!(
        source = %source.as_path().display(),
        archive = %archive_path.display(),
        files = report.files_added,
        directories = report.directories_added,
        bytes = report.bytes_read,
        "archive created"
    );

    Ok(report)
}

/// Creates the temporary file the archive is written to before it is
/// moved into place.
fn stage_archive(archive_path: &Path) -> Result<NamedTempFile> {
    let dir = match archive_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".ziptask-").suffix(".zip.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    Ok(builder.tempfile_in(dir)?)
}

/// Builds the per-entry options for the configured compression level.
fn entry_options(config: &ArchiveConfig) -> SimpleFileOptions {
    if config.compression_level == 0 {
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
    } else {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(config.compression_level)))
    }
}

/// Writes walked entries to any seekable writer.
fn write_entries<W: Write + Seek>(
    writer: W,
    entries: &[SourceEntry],
    config: &ArchiveConfig,
) -> Result<ArchiveReport> {
    let mut zip = ZipWriter::new(writer);
    let mut report = ArchiveReport::default();
    let options = entry_options(config);

    for entry in entries {
        match &entry.kind {
            EntryKind::File => {
                add_file(&mut zip, entry, config, options, &mut report)?;
            }
            EntryKind::Directory => {
                // The source root itself has no entry of its own
                if entry.relative.as_os_str().is_empty() {
                    continue;
                }
                let name = format!("{}/", filters::zip_entry_name(&entry.relative)?);
                tracing::debug!(entry = %name, "adding directory");
                zip.add_directory(name, options)
                    .map_err(|e| io::Error::other(format!("failed to add directory: {e}")))?;
                report.directories_added += 1;
            }
            EntryKind::Symlink { target } => {
                tracing::warn!(
                    path = %entry.path.display(),
                    target = %target.display(),
                    "skipping symlink"
                );
                report.entries_skipped += 1;
                report.add_warning(format!("Skipped symlink: {}", entry.path.display()));
            }
        }
    }

    zip.finish()
        .map_err(|e| io::Error::other(format!("failed to finish ZIP archive: {e}")))?;

    Ok(report)
}

fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &SourceEntry,
    config: &ArchiveConfig,
    options: SimpleFileOptions,
    report: &mut ArchiveReport,
) -> Result<()> {
    let mut file = File::open(&entry.path)?;

    let file_options = if config.preserve_permissions {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            options.unix_permissions(file.metadata()?.permissions().mode())
        }
        #[cfg(not(unix))]
        {
            options
        }
    } else {
        options
    };

    let name = filters::zip_entry_name(&entry.relative)?;
    tracing::debug!(entry = %name, size = entry.size, "adding file");

    zip.start_file(name, file_options)
        .map_err(|e| io::Error::other(format!("failed to start file in ZIP: {e}")))?;
    let copied = io::copy(&mut file, zip)?;

    report.files_added += 1;
    report.bytes_read += copied;

    Ok(())
}
