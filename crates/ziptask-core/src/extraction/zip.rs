//! ZIP archive extraction.

use crate::Result;
use crate::TaskError;
use crate::copy::CopyBuffer;
use crate::copy::copy_entry;
use crate::extraction::config::ExtractConfig;
use crate::extraction::report::ExtractionReport;
use std::fs;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;
use zip::ZipArchive;

/// Opens `archive_path` and parses its central directory.
///
/// # Errors
///
/// Returns [`TaskError::Io`] if the file cannot be opened and
/// [`TaskError::CorruptArchive`] if it is not a readable ZIP archive.
pub fn open_zip(archive_path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    let file = File::open(archive_path)?;
    ZipArchive::new(BufReader::new(file)).map_err(|e| match e {
        zip::result::ZipError::Io(io) => TaskError::Io(io),
        other => TaskError::CorruptArchive(format!(
            "failed to open ZIP archive {}: {other}",
            archive_path.display()
        )),
    })
}

/// Expands `archive_path` into `dest`.
///
/// The archive is parsed before `dest` is created, so an unreadable input
/// leaves nothing behind. Existing files are truncated and overwritten,
/// read-only ones included.
/// Entries written before a failure stay on disk.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use ziptask_core::extraction::ExtractConfig;
/// use ziptask_core::extraction::zip::extract_zip;
///
/// let report = extract_zip(
///     Path::new("bundle.zip"),
///     Path::new("/tmp/bundle"),
///     &ExtractConfig::default(),
/// )?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok::<(), ziptask_core::TaskError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The archive cannot be opened or parsed
/// - An entry name escapes the destination
/// - A selected entry is not present
/// - Entry data cannot be decoded
/// - Writing to the destination fails
pub fn extract_zip(
    archive_path: &Path,
    dest: &Path,
    config: &ExtractConfig,
) -> Result<ExtractionReport> {
    config.validate()?;

    let start = Instant::now();
    let mut archive = open_zip(archive_path)?;
    let indices = selected_indices(&archive, config)?;

    fs::create_dir_all(dest)?;

    let mut report = ExtractionReport::new();
    report.extraction_root = dest.to_path_buf();
    let mut buffer = CopyBuffer::new();

    for index in indices {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| TaskError::UnsafeEntry { name: name.clone() })?;
        let target = dest.join(&relative);

        if entry.is_dir() {
            tracing::debug!(entry = %name, "creating directory");
            fs::create_dir_all(&target)?;
            report.directories_created += 1;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::debug!(entry = %name, size = entry.size(), "extracting file");
        let mut output = create_for_overwrite(&target)?;
        let written = copy_entry(&name, &mut entry, &mut output, &mut buffer)?;

        if config.preserve_permissions
            && let Some(mode) = entry.unix_mode()
        {
            apply_permissions(&target, mode)?;
        }

        report.files_extracted += 1;
        report.bytes_written += written;
        report.extracted_files.push(target);
    }

    report.duration = start.elapsed();

    tracing::info!(
        archive = %archive_path.display(),
        dest = %dest.display(),
        entries = report.total_items(),
        bytes = report.bytes_written,
        "archive extracted"
    );

    Ok(report)
}

/// Opens `path` for writing, replacing a read-only file left there by an
/// earlier extraction.
fn create_for_overwrite(path: &Path) -> io::Result<File> {
    match File::create(path) {
        Err(err)
            if err.kind() == io::ErrorKind::PermissionDenied
                && fs::symlink_metadata(path).is_ok_and(|meta| meta.is_file()) =>
        {
            tracing::debug!(path = %path.display(), "replacing read-only file");
            fs::remove_file(path)?;
            File::create(path)
        }
        result => result,
    }
}

/// Resolves the entry indices to extract, in archive order.
fn selected_indices<R: std::io::Read + std::io::Seek>(
    archive: &ZipArchive<R>,
    config: &ExtractConfig,
) -> Result<Vec<usize>> {
    let Some(names) = &config.entries else {
        return Ok((0..archive.len()).collect());
    };

    let mut indices = Vec::with_capacity(names.len());
    for requested in names {
        let normalized = requested.replace('\\', "/");
        let index = archive
            .index_for_name(&normalized)
            .or_else(|| archive.index_for_name(&format!("{normalized}/")))
            .ok_or_else(|| TaskError::EntryNotFound {
                name: requested.clone(),
            })?;
        indices.push(index);
    }
    indices.sort_unstable();
    indices.dedup();
    Ok(indices)
}

#[cfg(unix)]
fn apply_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o777))?;
    Ok(())
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn apply_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
