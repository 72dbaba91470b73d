//! Error conversion utilities for CLI.
//!
//! Converts ziptask-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use std::path::Path;
use ziptask_core::TaskError;
use ziptask_core::tasks::TASK_NAMES;

/// Converts `TaskError` to user-friendly anyhow error with context
///
/// The original error stays in the chain so its category can be recovered
/// with [`error_code`].
pub fn convert_task_error(err: TaskError, path: &Path) -> anyhow::Error {
    let message = match &err {
        TaskError::InvalidSource { path: source, reason } => format!(
            "Cannot archive '{}': {reason}\n\
             HINT: The source must be an existing file or directory.",
            source.display()
        ),
        TaskError::Io(_) => format!("I/O error while processing '{}'", path.display()),
        TaskError::CorruptArchive(reason) => format!(
            "Invalid archive '{}': {reason}\n\
             HINT: The file may be corrupted or is not a ZIP archive.",
            path.display()
        ),
        TaskError::UnsafeEntry { name } => format!(
            "Archive '{}' contains an entry outside the destination: '{name}'\n\
             HINT: This archive may be malicious. Do not extract from untrusted sources.",
            path.display()
        ),
        TaskError::EntryNotFound { name } => format!(
            "Entry '{name}' not found in '{}'\n\
             HINT: Run `ziptask list` on the archive to see its entry names.",
            path.display()
        ),
        TaskError::UnknownTask { name } => format!(
            "Unknown task '{name}'\n\
             HINT: Available tasks: {}",
            TASK_NAMES.join(", ")
        ),
        TaskError::InvalidInputs { task, reason } => format!(
            "Invalid inputs for task '{task}': {reason}\n\
             HINT: Inputs must be a JSON object with \"file_path\" and an optional \"save_path\"."
        ),
        TaskError::InvalidConfig(_) => return anyhow::Error::new(err),
    };

    anyhow::Error::new(err).context(message)
}

/// Returns the stable category code of a core error in the chain
pub fn error_code(error: &anyhow::Error) -> Option<&'static str> {
    error
        .downcast_ref::<TaskError>()
        .map(|err| err.category().as_str())
}

/// Adds path context to a core result
pub fn add_path_context<T>(result: Result<T, TaskError>, path: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_task_error(e, path))
}
