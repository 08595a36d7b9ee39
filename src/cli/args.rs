//! CLI argument definitions using clap.
//!
//! keyshift takes exactly two positional arguments: the source to migrate
//! (a file or a directory) and the catalog file to update.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Source file or directory containing translation calls
    pub source: PathBuf,

    /// Catalog file to update (e.g. lang/en/messages.php); its file name is the key namespace
    pub catalog: PathBuf,

    /// Accept every suggested key without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Translation function to migrate (overrides config file)
    #[arg(long, env = "KEYSHIFT_FUNCTION")]
    pub function: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
