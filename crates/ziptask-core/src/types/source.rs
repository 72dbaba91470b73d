//! Validated archive source path.

use crate::Result;
use crate::TaskError;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

/// Suffix appended to a source's base name to form the archive file name.
pub const ARCHIVE_SUFFIX: &str = ".zip";

/// Filesystem classification of an archive source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Regular file (or a symlink resolving to one).
    File,
    /// Directory (or a symlink resolving to one).
    Directory,
}

/// A source path that existed and was a file or directory when validated.
///
/// # Examples
///
/// ```no_run
/// use ziptask_core::types::SourceKind;
/// use ziptask_core::types::SourcePath;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = SourcePath::new("/tmp/report.pdf")?;
/// assert_eq!(source.kind(), SourceKind::File);
/// assert_eq!(source.archive_file_name(), "report.pdf.zip");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePath {
    path: PathBuf,
    kind: SourceKind,
    base_name: OsString,
}

impl SourcePath {
    /// Classifies `path` using its (symlink-following) metadata.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidSource`] if the path does not exist, is a
    /// dangling symlink, is neither a file nor a directory, or has no base
    /// name. Other metadata failures surface as [`TaskError::Io`].
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(TaskError::invalid_source(path, "path does not exist"));
            }
            Err(e) => return Err(TaskError::Io(e)),
        };

        let kind = if metadata.is_file() {
            SourceKind::File
        } else if metadata.is_dir() {
            SourceKind::Directory
        } else {
            return Err(TaskError::invalid_source(
                path,
                "source is neither a file nor a directory",
            ));
        };

        let base_name = base_name_of(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            kind,
            base_name,
        })
    }

    /// Returns the path as given by the caller.
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Returns the source classification.
    pub const fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Returns the final path component used to name archives and entries.
    pub fn base_name(&self) -> &std::ffi::OsStr {
        &self.base_name
    }

    /// Returns `<base name>.zip`.
    pub fn archive_file_name(&self) -> OsString {
        let mut name = self.base_name.clone();
        name.push(ARCHIVE_SUFFIX);
        name
    }
}

/// Resolves the base name, canonicalizing paths such as `.` or `dir/..`
/// whose last component is not a normal name.
fn base_name_of(path: &Path) -> Result<OsString> {
    if let Some(name) = path.file_name() {
        return Ok(name.to_os_string());
    }

    let canonical = fs::canonicalize(path)?;
    canonical
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .ok_or_else(|| TaskError::invalid_source(path, "source has no base name"))
}
