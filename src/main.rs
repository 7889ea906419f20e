//! archetyper's command-line entry point.
//! Loads the configuration, prepares the destination directory and runs the
//! tree copy.

use std::fs;
use std::path::{Path, PathBuf};

use archetyper::{
    cli::{get_args, Args},
    config::Config,
    error::{default_error_handler, Error, Result},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Ensures the destination directory can be written from scratch.
///
/// # Arguments
/// * `dest_dir` - Directory the archetype is generated into
/// * `force` - Whether an existing directory is removed
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if it exists and force is false
/// * `Error::ConfigurationError` if it is a filesystem root
fn prepare_dest_dir(dest_dir: &Path, force: bool) -> Result<PathBuf> {
    if dest_dir.exists() {
        if !force {
            return Err(Error::OutputDirectoryExistsError {
                dest_dir: dest_dir.display().to_string(),
            });
        }
        if dest_dir.parent().is_none() {
            return Err(Error::ConfigurationError(format!(
                "cannot delete root directory '{}'",
                dest_dir.display()
            )));
        }
        log::debug!("Removing existing destination '{}'.", dest_dir.display());
        fs::remove_dir_all(dest_dir)?;
    }
    fs::create_dir_all(dest_dir)?;
    Ok(dest_dir.to_path_buf())
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the configuration
/// 2. Clears or creates the destination directory
/// 3. Copies the source tree
/// 4. Reports the produced files
fn run(args: Args) -> Result<()> {
    let config = Config::load(&args.config)?;
    let dest_dir = prepare_dest_dir(&config.dest_dir(), args.force)?;
    for variable in &config.variables {
        log::debug!(
            "Variable '{}' derived from '{}' with {}.",
            variable.name(),
            variable.source(),
            variable.transform()
        );
    }

    let result = config.copy_job()?.run()?;

    for file in result.text_files() {
        println!("text: '{}'", file.display());
    }
    for file in result.binary_files() {
        println!("binary: '{}'", file.display());
    }
    println!(
        "Copied {} files into {}.",
        result.len(),
        dest_dir.display()
    );
    Ok(())
}
