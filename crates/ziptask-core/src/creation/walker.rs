//! Source tree walking with filtering.
//!
//! Directory sources are traversed with `walkdir`, sorted by file name so the
//! resulting archive has a stable entry order.

use crate::Result;
use crate::TaskError;
use crate::creation::config::ArchiveConfig;
use crate::creation::filters;
use crate::types::SourceKind;
use crate::types::SourcePath;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Kind of a walked source entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,

    /// Directory.
    Directory,

    /// Symbolic link that was not followed.
    Symlink {
        /// Target of the symlink.
        target: PathBuf,
    },
}

/// A walked entry with its path relative to the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Full filesystem path to the entry.
    pub path: PathBuf,

    /// Path relative to the source root. Empty for the root directory.
    pub relative: PathBuf,

    /// Entry kind.
    pub kind: EntryKind,

    /// Size in bytes (0 for directories and symlinks).
    pub size: u64,
}

/// Walks a directory source, applying the filters from `ArchiveConfig`.
///
/// Hidden or excluded directories are pruned, so nothing beneath them is
/// visited. An optional path (typically the archive being written) is
/// skipped.
///
/// Following symlinks never leaves the source through a link to one of its
/// ancestors; such links are reported like unfollowed symlinks.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use ziptask_core::creation::ArchiveConfig;
/// use ziptask_core::creation::walker::SourceWalker;
///
/// let config = ArchiveConfig::default();
/// let walker = SourceWalker::new(Path::new("./project"), &config);
/// for entry in walker.walk() {
///     let entry = entry?;
///     println!("{}", entry.relative.display());
/// }
/// # Ok::<(), ziptask_core::TaskError>(())
/// ```
pub struct SourceWalker<'a> {
    root: &'a Path,
    config: &'a ArchiveConfig,
    skip: Option<PathBuf>,
}

impl<'a> SourceWalker<'a> {
    /// Creates a walker rooted at `root`.
    #[must_use]
    pub fn new(root: &'a Path, config: &'a ArchiveConfig) -> Self {
        Self {
            root,
            config,
            skip: None,
        }
    }

    /// Skips `path` if it is encountered during the walk.
    ///
    /// Only the parent directory of `path` has to exist; the file itself may
    /// be created later.
    #[must_use]
    pub fn skipping(mut self, path: &Path) -> Self {
        self.skip = canonical_location(path);
        self
    }

    /// Returns an iterator over filtered entries, the root directory first.
    ///
    /// When symlinks are followed, a symlinked directory that resolves to
    /// the root or one of its ancestors is not descended into. It is
    /// yielded as [`EntryKind::Symlink`] instead, as are links that
    /// `walkdir` reports as file system loops.
    ///
    /// # Errors
    ///
    /// Items are errors if a directory cannot be read, metadata cannot be
    /// obtained, or a followed symlink is dangling.
    pub fn walk(&self) -> impl Iterator<Item = Result<SourceEntry>> + '_ {
        let root = fs::canonicalize(self.root).unwrap_or_else(|_| self.root.to_path_buf());
        let mut entries = WalkDir::new(&root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter();

        std::iter::from_fn(move || {
            loop {
                let entry = match entries.next()? {
                    Ok(entry) => entry,
                    Err(e) => {
                        if e.loop_ancestor().is_some()
                            && let Some(path) = e.path()
                        {
                            return Some(unfollowed_link(path, &root));
                        }
                        return Some(Err(TaskError::Io(std::io::Error::other(format!(
                            "walkdir error: {e}"
                        )))));
                    }
                };

                let kept = entry
                    .path()
                    .strip_prefix(&root)
                    .is_ok_and(|rel| !filters::should_skip(rel, self.config));
                if !kept || self.skip.as_deref() == Some(entry.path()) {
                    if entry.file_type().is_dir() {
                        entries.skip_current_dir();
                    }
                    continue;
                }

                if entry.path_is_symlink()
                    && entry.file_type().is_dir()
                    && resolves_to_ancestor(entry.path(), &root)
                {
                    entries.skip_current_dir();
                    return Some(unfollowed_link(entry.path(), &root));
                }

                return Some(build_entry(&entry, &root));
            }
        })
    }
}

/// Canonical parent of `path` joined with its file name.
fn canonical_location(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).ok().map(|parent| parent.join(name))
}

fn resolves_to_ancestor(link: &Path, root: &Path) -> bool {
    fs::canonicalize(link).is_ok_and(|target| root.starts_with(target))
}

fn unfollowed_link(path: &Path, root: &Path) -> Result<SourceEntry> {
    tracing::warn!(path = %path.display(), "symlink resolves to an ancestor of the source, not following");
    Ok(SourceEntry {
        path: path.to_path_buf(),
        relative: filters::relative_to_root(path, root)?,
        kind: EntryKind::Symlink {
            target: fs::read_link(path)?,
        },
        size: 0,
    })
}

fn build_entry(entry: &walkdir::DirEntry, root: &Path) -> Result<SourceEntry> {
    let path = entry.path().to_path_buf();
    let relative = filters::relative_to_root(&path, root)?;
    let file_type = entry.file_type();

    let (kind, size) = if file_type.is_symlink() {
        let target = fs::read_link(&path)?;
        (EntryKind::Symlink { target }, 0)
    } else if file_type.is_dir() {
        (EntryKind::Directory, 0)
    } else {
        let metadata = entry.metadata().map_err(|e| {
            TaskError::Io(std::io::Error::other(format!(
                "cannot read metadata for {}: {e}",
                path.display()
            )))
        })?;
        (EntryKind::File, metadata.len())
    };

    Ok(SourceEntry {
        path,
        relative,
        kind,
        size,
    })
}

/// Collects the entries of a validated source.
///
/// A file source yields a single entry named after its base name. A
/// directory source yields the walked tree, root first.
///
/// # Errors
///
/// Returns the first walk error encountered.
pub fn collect_entries(
    source: &SourcePath,
    config: &ArchiveConfig,
    skip: Option<&Path>,
) -> Result<Vec<SourceEntry>> {
    match source.kind() {
        SourceKind::File => {
            let size = fs::metadata(source.as_path())?.len();
            Ok(vec![SourceEntry {
                path: source.as_path().to_path_buf(),
                relative: PathBuf::from(source.base_name()),
                kind: EntryKind::File,
                size,
            }])
        }
        SourceKind::Directory => {
            let mut walker = SourceWalker::new(source.as_path(), config);
            if let Some(skip) = skip {
                walker = walker.skipping(skip);
            }
            walker.walk().collect()
        }
    }
}
