//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Folder Mirror - Keep a replica directory identical to a source directory
///
/// Runs a fixed number of one-way sync passes, sleeping between them. Each
/// pass copies new and changed files into the replica, then removes whatever
/// the source no longer has. Symbolic links are never followed or copied.
///
/// Examples:
///   mirror ./data /mnt/backup 60 10 sync.log    # 10 passes, one per minute
///   mirror ./data /mnt/backup 0 1 sync.log      # single pass
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "mirror")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Directory to mirror from
    pub source: PathBuf,

    /// Directory to keep in sync with the source
    pub replica: PathBuf,

    /// Seconds to wait between passes (>= 0)
    #[arg(allow_negative_numbers = true)]
    pub interval: i64,

    /// Number of passes to run (>= 1)
    #[arg(allow_negative_numbers = true)]
    pub passes: i64,

    /// File that log lines are appended to
    pub log_file: PathBuf,

    /// Enable debug-level output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a JSON summary of every pass on stdout when done
    #[arg(long)]
    pub json: bool,
}
