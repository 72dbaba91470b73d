//! Archive creation from a file or directory source.
//!
//! ```no_run
//! use std::path::Path;
//! use ziptask_core::creation::ArchiveConfig;
//! use ziptask_core::creation::zip::create_zip;
//! use ziptask_core::types::SourcePath;
//!
//! let source = SourcePath::new("photos")?;
//! let config = ArchiveConfig::default().with_compression_level(9);
//! let report = create_zip(&source, Path::new("/tmp/photos.zip"), &config)?;
//! println!("{} entries", report.total_entries());
//! # Ok::<(), ziptask_core::TaskError>(())
//! ```

pub mod config;
pub mod filters;
pub mod report;
pub mod walker;
pub mod zip;

pub use config::ArchiveConfig;
pub use report::ArchiveReport;
