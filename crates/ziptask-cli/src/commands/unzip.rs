//! Unzip command implementation.

use super::save_path;
use crate::cli::UnzipArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use ziptask_core::ExtractConfig;
use ziptask_core::TaskContext;
use ziptask_core::extract_with_config;

pub fn execute(
    args: &UnzipArgs,
    ctx: &TaskContext,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let mut config = ExtractConfig::new();
    if !args.entries.is_empty() {
        config = config.with_entries(args.entries.clone());
    }

    let report = add_path_context(
        extract_with_config(
            &args.file_path,
            save_path(args.save_path.as_ref()),
            ctx,
            &config,
        ),
        &args.file_path,
    )?;

    formatter.format_extraction_result(&report)
}
