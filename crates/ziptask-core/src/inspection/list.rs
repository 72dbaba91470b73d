//! Archive listing implementation.

use std::path::Path;

use zip::CompressionMethod;

use crate::Result;
use crate::extraction::zip::open_zip;
use crate::inspection::manifest::ArchiveManifest;
use crate::inspection::manifest::ManifestEntry;

/// Lists archive contents without extracting.
///
/// No files are written to disk during this operation.
///
/// # Errors
///
/// Returns error if:
/// - Archive file cannot be opened
/// - Archive is not a ZIP archive or an entry header is corrupted
///
/// # Examples
///
/// ```no_run
/// use ziptask_core::inspection::list_zip;
///
/// let manifest = list_zip("bundle.zip")?;
/// for entry in &manifest.entries {
///     println!("{}: {} bytes", entry.name, entry.size);
/// }
/// # Ok::<(), ziptask_core::TaskError>(())
/// ```
pub fn list_zip<P: AsRef<Path>>(archive_path: P) -> Result<ArchiveManifest> {
    let archive_path = archive_path.as_ref();
    let mut archive = open_zip(archive_path)?;
    let mut manifest = ArchiveManifest::new();

    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        manifest.add_entry(ManifestEntry {
            name: entry.name().to_string(),
            is_dir: entry.is_dir(),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
            crc32: entry.crc32(),
            compression: method_name(entry.compression()),
        });
    }

    tracing::debug!(
        archive = %archive_path.display(),
        entries = manifest.len(),
        "archive listed"
    );

    Ok(manifest)
}

fn method_name(method: CompressionMethod) -> String {
    match method {
        CompressionMethod::Stored => "stored".to_string(),
        CompressionMethod::Deflated => "deflated".to_string(),
        other => format!("{other:?}").to_lowercase(),
    }
}
