//! Verify command implementation

use crate::cli::VerifyArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use std::process::ExitCode;
use ziptask_core::verify_archive;

/// Prints the report and fails the process when any entry is damaged.
pub fn execute(args: &VerifyArgs, formatter: &dyn OutputFormatter) -> Result<ExitCode> {
    let report = add_path_context(verify_archive(&args.archive), &args.archive)?;

    formatter.format_verification(&report)?;

    if report.is_valid() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
