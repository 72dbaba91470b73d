//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use crate::error::error_code;
use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::io::{self};
use ziptask_core::ArchiveManifest;
use ziptask_core::ArchiveReport;
use ziptask_core::ExtractionReport;
use ziptask_core::VerificationReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ArchiveOutput {
    zip_address: String,
    files_added: usize,
    directories_added: usize,
    entries_skipped: usize,
    bytes_read: u64,
    archive_size: u64,
    compression_percentage: f64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl From<&ArchiveReport> for ArchiveOutput {
    fn from(report: &ArchiveReport) -> Self {
        Self {
            zip_address: report.archive_path.display().to_string(),
            files_added: report.files_added,
            directories_added: report.directories_added,
            entries_skipped: report.entries_skipped,
            bytes_read: report.bytes_read,
            archive_size: report.archive_size,
            compression_percentage: report.compression_percentage(),
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_archive_result(&self, report: &ArchiveReport) -> Result<()> {
        Self::output(&JsonOutput::success("zip", ArchiveOutput::from(report)))
    }

    fn format_extraction_result(&self, report: &ExtractionReport) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractionOutput {
            unzip_address: String,
            files_extracted: usize,
            directories_created: usize,
            bytes_written: u64,
            duration_ms: u128,
        }

        let data = ExtractionOutput {
            unzip_address: report.extraction_root.display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("unzip", data))
    }

    fn format_manifest(
        &self,
        manifest: &ArchiveManifest,
        _long: bool,
        _human_readable: bool,
    ) -> Result<()> {
        Self::output(&JsonOutput::success("list", manifest))
    }

    fn format_verification(&self, report: &VerificationReport) -> Result<()> {
        #[derive(Serialize)]
        struct VerificationOutput<'a> {
            is_valid: bool,
            #[serde(flatten)]
            report: &'a VerificationReport,
        }

        let data = VerificationOutput {
            is_valid: report.is_valid(),
            report,
        };

        Self::output(&JsonOutput::success("verify", data))
    }

    fn format_task_output(&self, task: &str, outputs: &Value) -> Result<()> {
        Self::output(&JsonOutput::success(task, outputs))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"), error_code(error));
        let _ = Self::output(&output);
        let _ = writeln!(io::stderr(), "Error: {error:?}");
    }
}
