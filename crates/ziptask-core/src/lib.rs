//! Zip and unzip task handlers for workflow orchestration hosts.
//!
//! `ziptask-core` archives a file or directory into a ZIP archive and
//! expands ZIP archives back onto disk. Destinations default to the session
//! directory supplied by the host through a [`TaskContext`].
//!
//! # Examples
//!
//! ```no_run
//! use ziptask_core::TaskContext;
//! use ziptask_core::archive;
//! use ziptask_core::extract;
//!
//! let ctx = TaskContext::new("/sess/42");
//! let zip = archive("/data/photos", None::<&str>, &ctx)?;
//! let dir = extract(&zip, Some("/data/restored"), &ctx)?;
//! println!("{} -> {}", zip.display(), dir.display());
//! # Ok::<(), ziptask_core::TaskError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod context;
pub mod copy;
pub mod creation;
pub mod error;
pub mod extraction;
pub mod inspection;
pub mod tasks;
#[doc(hidden)]
pub mod test_utils;
pub mod types;

pub use api::archive;
pub use api::archive_with_config;
pub use api::extract;
pub use api::extract_with_config;
pub use api::list_archive;
pub use api::verify_archive;
pub use context::TaskContext;
pub use creation::ArchiveConfig;
pub use creation::ArchiveReport;
pub use error::ErrorCategory;
pub use error::Result;
pub use error::TaskError;
pub use extraction::ExtractConfig;
pub use extraction::ExtractionReport;
pub use inspection::ArchiveManifest;
pub use inspection::EntryFailure;
pub use inspection::ManifestEntry;
pub use inspection::VerificationReport;
pub use tasks::ArchiveInputs;
pub use tasks::PathInputs;
pub use tasks::Task;
pub use tasks::UnzipOutputs;
pub use tasks::UnzipTask;
pub use tasks::VerifyOutputs;
pub use tasks::VerifyTask;
pub use tasks::ZipOutputs;
pub use tasks::ZipTask;
pub use tasks::run_task;
pub use types::SourceKind;
pub use types::SourcePath;
