//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use ziptask_core::context::SESSION_DIR_ENV;
use ziptask_core::creation::config::DEFAULT_COMPRESSION_LEVEL;
use ziptask_core::tasks::TASK_NAMES;

#[derive(Parser)]
#[command(name = "ziptask")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory used when no destination is given (default: current directory)
    #[arg(long, global = true, env = SESSION_DIR_ENV, value_name = "DIR")]
    pub session_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Archive a file or folder into <SAVE_PATH>/<name>.zip
    Zip(ZipArgs),
    /// Extract an archive into a directory
    Unzip(UnzipArgs),
    /// List archive contents without extraction
    List(ListArgs),
    /// Read every entry and report damaged ones
    Verify(VerifyArgs),
    /// Run a task by name with JSON inputs
    Run(RunArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

impl Commands {
    /// Operation name reported in JSON output.
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Zip(_) => "zip",
            Self::Unzip(_) => "unzip",
            Self::List(_) => "list",
            Self::Verify(_) => "verify",
            Self::Run(_) => "run",
            Self::Completion(_) => "completion",
        }
    }
}

#[derive(clap::Args)]
pub struct ZipArgs {
    /// File or directory to archive
    #[arg(value_name = "FILE_PATH")]
    pub file_path: PathBuf,

    /// Directory to write the archive into (default: session directory)
    #[arg(value_name = "SAVE_PATH")]
    pub save_path: Option<PathBuf>,

    /// Compression level (0 = stored, 9 = smallest)
    #[arg(
        short = 'l',
        long,
        default_value_t = DEFAULT_COMPRESSION_LEVEL,
        value_parser = clap::value_parser!(u8).range(0..=9)
    )]
    pub compression_level: u8,

    /// Exclude pattern (exact name, *.ext or prefix*; can be repeated)
    #[arg(long = "exclude", short = 'x', value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Skip symbolic links instead of archiving their targets
    #[arg(long)]
    pub no_follow_symlinks: bool,

    /// Leave out files and directories whose name starts with '.'
    #[arg(long)]
    pub exclude_hidden: bool,
}

#[derive(clap::Args)]
pub struct UnzipArgs {
    /// Path to the archive file
    #[arg(value_name = "FILE_PATH")]
    pub file_path: PathBuf,

    /// Output directory (default: session directory)
    #[arg(value_name = "SAVE_PATH")]
    pub save_path: Option<PathBuf>,

    /// Extract only this entry (can be repeated)
    #[arg(long = "entry", value_name = "NAME")]
    pub entries: Vec<String>,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show detailed entry information
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct VerifyArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Task name
    #[arg(value_name = "TASK", value_parser = clap::builder::PossibleValuesParser::new(TASK_NAMES))]
    pub task: String,

    /// Inputs as a JSON object (read from stdin when omitted)
    #[arg(long, value_name = "JSON")]
    pub inputs: Option<String>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
