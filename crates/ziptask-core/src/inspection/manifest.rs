//! Archive listing results.

use serde::Serialize;

/// One entry of an archive listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// Entry name as stored in the archive.
    pub name: String,

    /// Whether the entry is a directory.
    pub is_dir: bool,

    /// Uncompressed size in bytes.
    pub size: u64,

    /// Compressed size in bytes.
    pub compressed_size: u64,

    /// CRC-32 of the uncompressed data.
    pub crc32: u32,

    /// Compression method name (`stored`, `deflated`, ...).
    pub compression: String,
}

/// Listing of every entry in an archive, with totals.
///
/// # Examples
///
/// ```
/// use ziptask_core::inspection::ArchiveManifest;
/// use ziptask_core::inspection::ManifestEntry;
///
/// let mut manifest = ArchiveManifest::new();
/// manifest.add_entry(ManifestEntry {
///     name: "notes.txt".to_string(),
///     is_dir: false,
///     size: 100,
///     compressed_size: 40,
///     crc32: 0,
///     compression: "deflated".to_string(),
/// });
///
/// assert_eq!(manifest.total_files, 1);
/// assert_eq!(manifest.compression_ratio(), 0.4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveManifest {
    /// Entries in central-directory order.
    pub entries: Vec<ManifestEntry>,

    /// Number of file entries.
    pub total_files: usize,

    /// Number of directory entries.
    pub total_directories: usize,

    /// Sum of uncompressed sizes.
    pub total_size: u64,

    /// Sum of compressed sizes.
    pub total_compressed_size: u64,
}

impl ArchiveManifest {
    /// Creates an empty manifest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and updates the totals.
    pub fn add_entry(&mut self, entry: ManifestEntry) {
        if entry.is_dir {
            self.total_directories += 1;
        } else {
            self.total_files += 1;
        }
        self.total_size += entry.size;
        self.total_compressed_size += entry.compressed_size;
        self.entries.push(entry);
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns compressed size divided by uncompressed size.
    ///
    /// Returns 1.0 for an archive with no content.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.total_size == 0 {
            return 1.0;
        }
        self.total_compressed_size as f64 / self.total_size as f64
    }
}
