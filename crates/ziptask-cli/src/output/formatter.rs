//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use ziptask_core::ArchiveManifest;
use ziptask_core::ArchiveReport;
use ziptask_core::ExtractionReport;
use ziptask_core::VerificationReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format archive creation result
    fn format_archive_result(&self, report: &ArchiveReport) -> Result<()>;

    /// Format extraction result
    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()>;

    /// Format archive listing
    fn format_manifest(
        &self,
        manifest: &ArchiveManifest,
        long: bool,
        human_readable: bool,
    ) -> Result<()>;

    /// Format archive verification report
    fn format_verification(&self, report: &VerificationReport) -> Result<()>;

    /// Format raw task outputs
    fn format_task_output(&self, task: &str, outputs: &Value) -> Result<()>;

    /// Format error message (always shown, even when quiet)
    fn format_error(&self, operation: &str, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
            code: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(
        operation: impl Into<String>,
        error: impl Into<String>,
        code: Option<&'static str>,
    ) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
            code,
        }
    }
}
