//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Opens and closes a Personal Folder File using the libpff native module.
#[derive(Parser)]
#[command(name = "pffio")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Path to the PFF file (PST/OST/PAB)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Open the file read-write instead of read-only
    #[arg(long)]
    pub read_write: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,
}
