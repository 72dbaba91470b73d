//! Archive inspection without extraction.
//!
//! # Examples
//!
//! ```no_run
//! use ziptask_core::inspection::list_zip;
//!
//! let manifest = list_zip("bundle.zip")?;
//! println!(
//!     "{} files, {} directories",
//!     manifest.total_files, manifest.total_directories
//! );
//! # Ok::<(), ziptask_core::TaskError>(())
//! ```

pub mod list;
pub mod manifest;
pub mod verify;

pub use list::list_zip;
pub use manifest::ArchiveManifest;
pub use manifest::ManifestEntry;
pub use verify::EntryFailure;
pub use verify::VerificationReport;
pub use verify::verify_zip;
