//! Execution context supplied by the orchestration host.

use std::env;
use std::path::Path;
use std::path::PathBuf;

/// Environment variable naming the session directory.
pub const SESSION_DIR_ENV: &str = "ZIPTASK_SESSION_DIR";

/// Host-supplied context for a single task invocation.
///
/// The session directory is the default destination for both archives and
/// extracted contents when the caller does not pass one explicitly.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ziptask_core::TaskContext;
///
/// let ctx = TaskContext::new("/sess/42");
/// assert_eq!(ctx.session_dir(), Path::new("/sess/42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskContext {
    session_dir: PathBuf,
}

impl TaskContext {
    /// Creates a context with an explicit session directory.
    pub fn new(session_dir: impl Into<PathBuf>) -> Self {
        Self {
            session_dir: session_dir.into(),
        }
    }

    /// Creates a context from `ZIPTASK_SESSION_DIR`.
    ///
    /// Falls back to the current working directory when the variable is
    /// unset or empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is needed and cannot be
    /// determined.
    pub fn from_env() -> std::io::Result<Self> {
        match env::var_os(SESSION_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Ok(Self::new(dir)),
            _ => Ok(Self::new(env::current_dir()?)),
        }
    }

    /// Returns the session directory.
    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    /// Resolves an optional caller destination against the session directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use ziptask_core::TaskContext;
    ///
    /// let ctx = TaskContext::new("/sess");
    /// assert_eq!(ctx.resolve_output(None::<&Path>), Path::new("/sess"));
    /// assert_eq!(ctx.resolve_output(Some("/out")), Path::new("/out"));
    /// ```
    pub fn resolve_output<P: AsRef<Path>>(&self, output_dir: Option<P>) -> PathBuf {
        output_dir.map_or_else(
            || self.session_dir.clone(),
            |dir| dir.as_ref().to_path_buf(),
        )
    }
}
