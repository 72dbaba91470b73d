//! Subcommand implementations.

pub mod completion;
pub mod list;
pub mod run;
pub mod unzip;
pub mod verify;
pub mod zip;

use std::path::Path;
use std::path::PathBuf;

/// Treats an empty positional destination like an absent one.
fn save_path(arg: Option<&PathBuf>) -> Option<&Path> {
    arg.map(PathBuf::as_path)
        .filter(|path| !path.as_os_str().is_empty())
}
