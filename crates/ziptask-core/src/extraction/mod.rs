//! Archive extraction.
//!
//! Expands a ZIP archive into a destination directory, recreating the
//! relative structure stored in the archive.

pub mod config;
pub mod report;
pub mod zip;

pub use config::ExtractConfig;
pub use report::ExtractionReport;
