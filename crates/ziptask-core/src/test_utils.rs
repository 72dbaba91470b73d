//! Test utilities for building ZIP archives in memory.
//!
//! Shared by unit tests, integration tests and benchmarks.
//!
//! # Panics
//!
//! Every helper panics on I/O or ZIP errors. Only call them from tests.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::fs;
use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Inverts the first byte of `needle` inside `archive` bytes.
///
/// Used on stored entries to break their CRC-32 while every header stays
/// readable. `needle` must occur in the entry data only, not in a name.
pub fn corrupt_bytes(archive: &mut [u8], needle: &[u8]) {
    let pos = archive
        .windows(needle.len())
        .position(|window| window == needle)
        .unwrap();
    archive[pos] = !archive[pos];
}

/// Writes a small source tree under `root` for archive round-trip tests.
///
/// Layout: `a/b.txt`, `c.txt`, `empty/` and `nested/deep/data.bin`.
pub fn create_sample_tree(root: &Path) {
    fs::create_dir_all(root.join("a")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::create_dir_all(root.join("nested/deep")).unwrap();
    fs::write(root.join("a/b.txt"), b"bee").unwrap();
    fs::write(root.join("c.txt"), b"sea").unwrap();
    let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
    fs::write(root.join("nested/deep/data.bin"), data).unwrap();
}

/// Builder for creating ZIP test archives with various entry kinds.
///
/// Entry names are written verbatim, so hostile names such as
/// `../escape.txt` can be produced.
///
/// # Examples
///
/// ```
/// use ziptask_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("dir/")
///     .add_file("dir/file.txt", b"content")
///     .add_deflated_file("big.txt", &[b'a'; 4096])
///     .build();
/// assert!(!zip_data.is_empty());
/// ```
pub struct ZipTestBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored regular file with mode 0o644.
    #[must_use]
    pub fn add_file(self, name: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(name, data, 0o644)
    }

    /// Adds a stored regular file with a custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, name: &str, data: &[u8], mode: u32) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .unix_permissions(mode);

        self.zip.start_file(name, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a DEFLATE-compressed regular file.
    #[must_use]
    pub fn add_deflated_file(mut self, name: &str, data: &[u8]) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        self.zip.start_file(name, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, name: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(name, options).unwrap();
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
