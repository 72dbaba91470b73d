//! Run command implementation.
//!
//! Invokes a task the way an orchestration host does: JSON inputs in, JSON
//! outputs out.

use crate::cli::RunArgs;
use crate::error::add_path_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use serde_json::Value;
use std::io;
use std::io::Read;
use std::path::PathBuf;
use ziptask_core::TaskContext;
use ziptask_core::run_task;

pub fn execute(args: &RunArgs, ctx: &TaskContext, formatter: &dyn OutputFormatter) -> Result<()> {
    let raw = match &args.inputs {
        Some(inputs) => inputs.clone(),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read task inputs from stdin")?;
            buf
        }
    };

    let inputs: Value = serde_json::from_str(&raw).context("task inputs are not valid JSON")?;
    let file_path = source_path(&inputs);

    let outputs = add_path_context(run_task(&args.task, inputs, ctx), &file_path)?;

    formatter.format_task_output(&args.task, &outputs)
}

/// Extracts `file_path` from raw inputs for error context.
fn source_path(inputs: &Value) -> PathBuf {
    inputs
        .get("file_path")
        .and_then(Value::as_str)
        .map(PathBuf::from)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_path() {
        assert_eq!(
            source_path(&json!({"file_path": "/tmp/a.zip"})),
            PathBuf::from("/tmp/a.zip")
        );
        assert_eq!(source_path(&json!({"file_path": 3})), PathBuf::new());
        assert_eq!(source_path(&json!([])), PathBuf::new());
    }
}
