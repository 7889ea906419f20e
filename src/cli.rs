//! Command-line interface implementation for archetyper.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for archetyper.
#[derive(Parser, Debug)]
#[command(author, version, about = "archetyper: turn an example project into a project template", long_about = None)]
pub struct Args {
    /// Configuration file, or a directory containing archetyper.json/.yml/.yaml
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Remove an existing destination directory before copying
    #[arg(short, long)]
    pub force: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments, exiting with clap's usage message on
/// invalid input.
pub fn get_args() -> Args {
    Args::parse()
}
