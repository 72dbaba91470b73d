//! Zip command implementation.

use super::save_path;
use crate::cli::ZipArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use ziptask_core::ArchiveConfig;
use ziptask_core::TaskContext;
use ziptask_core::archive_with_config;

pub fn execute(args: &ZipArgs, ctx: &TaskContext, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = ArchiveConfig::new()
        .with_compression_level(args.compression_level)
        .with_include_hidden(!args.exclude_hidden)
        .with_follow_symlinks(!args.no_follow_symlinks)
        .with_exclude_patterns(args.exclude.clone());

    let report = add_path_context(
        archive_with_config(
            &args.file_path,
            save_path(args.save_path.as_ref()),
            ctx,
            &config,
        ),
        &args.file_path,
    )?;

    formatter.format_archive_result(&report)
}
