//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use ziptask_core::list_archive;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let manifest = add_path_context(list_archive(&args.archive), &args.archive)?;
    formatter.format_manifest(&manifest, args.long, args.human_readable)
}
