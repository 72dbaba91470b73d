//! Host-facing task wrappers.
//!
//! Each task exposes a serde-typed input and output schema matching what the
//! orchestration host sends and expects back. [`run_task`] dispatches raw
//! JSON by task name.

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;

use crate::Result;
use crate::TaskContext;
use crate::TaskError;
use crate::api;

/// A unit of work the host can invoke by name.
pub trait Task {
    /// Name the host uses to select this task.
    const NAME: &'static str;

    /// Input schema.
    type Inputs: DeserializeOwned;

    /// Output schema.
    type Outputs: Serialize;

    /// Runs the task.
    ///
    /// # Errors
    ///
    /// Returns the underlying operation's error unchanged.
    fn run(&self, inputs: Self::Inputs, ctx: &TaskContext) -> Result<Self::Outputs>;
}

/// Inputs shared by the zip and unzip tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathInputs {
    /// Source file, directory or archive.
    pub file_path: PathBuf,

    /// Destination directory. Absent or empty means the session directory.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub save_path: Option<PathBuf>,
}

/// Inputs of tasks that only read an archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveInputs {
    /// Archive to read.
    pub file_path: PathBuf,
}

/// Output of [`ZipTask`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipOutputs {
    /// Absolute path of the written archive.
    pub zip_address: PathBuf,
}

/// Output of [`UnzipTask`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnzipOutputs {
    /// Directory the archive was extracted into.
    pub unzip_address: PathBuf,
}

/// Output of [`VerifyTask`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOutputs {
    /// `true` when every entry read back intact.
    pub is_valid: bool,

    /// Number of file entries read.
    pub tested_files_count: usize,

    /// Names of the damaged entries.
    pub corrupted_files: Vec<String>,

    /// One `name: reason` line per damaged entry.
    pub validation_errors: Vec<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()).map(PathBuf::from))
}

/// Archives a file or folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipTask;

impl Task for ZipTask {
    const NAME: &'static str = "file-to-zip";
    type Inputs = PathInputs;
    type Outputs = ZipOutputs;

    fn run(&self, inputs: PathInputs, ctx: &TaskContext) -> Result<ZipOutputs> {
        let zip_address = api::archive(&inputs.file_path, inputs.save_path.as_ref(), ctx)?;
        Ok(ZipOutputs { zip_address })
    }
}

/// Expands an archive.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnzipTask;

impl Task for UnzipTask {
    const NAME: &'static str = "unzip";
    type Inputs = PathInputs;
    type Outputs = UnzipOutputs;

    fn run(&self, inputs: PathInputs, ctx: &TaskContext) -> Result<UnzipOutputs> {
        let unzip_address = api::extract(&inputs.file_path, inputs.save_path.as_ref(), ctx)?;
        Ok(UnzipOutputs { unzip_address })
    }
}

/// Checks an archive for damaged entries without extracting it.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyTask;

impl Task for VerifyTask {
    const NAME: &'static str = "zip-validate";
    type Inputs = ArchiveInputs;
    type Outputs = VerifyOutputs;

    fn run(&self, inputs: ArchiveInputs, _ctx: &TaskContext) -> Result<VerifyOutputs> {
        let report = api::verify_archive(&inputs.file_path)?;
        Ok(VerifyOutputs {
            is_valid: report.is_valid(),
            tested_files_count: report.entries_checked,
            corrupted_files: report.failures.iter().map(|f| f.name.clone()).collect(),
            validation_errors: report
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.name, f.reason))
                .collect(),
        })
    }
}

/// Names of every registered task.
pub const TASK_NAMES: [&str; 3] = [ZipTask::NAME, UnzipTask::NAME, VerifyTask::NAME];

/// Runs the task registered under `name` with raw JSON inputs.
///
/// # Errors
///
/// Returns [`TaskError::UnknownTask`] for an unregistered name,
/// [`TaskError::InvalidInputs`] when `inputs` do not match the task's
/// schema, or the task's own error.
///
/// # Examples
///
/// ```no_run
/// use serde_json::json;
/// use ziptask_core::TaskContext;
/// use ziptask_core::run_task;
///
/// let ctx = TaskContext::new("/sess/42");
/// let outputs = run_task("file-to-zip", json!({"file_path": "/tmp/report.pdf"}), &ctx)?;
/// assert_eq!(outputs["zip_address"], "/sess/42/report.pdf.zip");
/// # Ok::<(), ziptask_core::TaskError>(())
/// ```
pub fn run_task(name: &str, inputs: Value, ctx: &TaskContext) -> Result<Value> {
    match name {
        ZipTask::NAME => dispatch(&ZipTask, inputs, ctx),
        UnzipTask::NAME => dispatch(&UnzipTask, inputs, ctx),
        VerifyTask::NAME => dispatch(&VerifyTask, inputs, ctx),
        _ => Err(TaskError::UnknownTask {
            name: name.to_string(),
        }),
    }
}

fn dispatch<T: Task>(task: &T, inputs: Value, ctx: &TaskContext) -> Result<Value> {
    let inputs: T::Inputs =
        serde_json::from_value(inputs).map_err(|e| TaskError::InvalidInputs {
            task: T::NAME.to_string(),
            reason: e.to_string(),
        })?;

    tracing::debug!(task = T::NAME, "running task");
    let outputs = task.run(inputs, ctx)?;

    serde_json::to_value(outputs).map_err(|e| {
        TaskError::Io(std::io::Error::other(format!(
            "failed to serialize {} outputs: {e}",
            T::NAME
        )))
    })
}
