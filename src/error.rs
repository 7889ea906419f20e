//! Error handling for archetyper.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning a source tree into an archetype.
///
/// Every variant is fatal for the current run: nothing is retried and the
/// tree copy stops at the first error.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A mapping, filter or configuration value failed validation
    #[error("Configuration error: {0}.")]
    ConfigurationError(String),

    /// The configuration file could not be parsed as JSON or YAML
    #[error("Failed to parse configuration '{file}': {reason}.")]
    ConfigParseError { file: String, reason: String },

    /// A selected file is neither a binary nor a text file
    #[error("File found that is neither binary nor text file: '{file}'.")]
    UnclassifiedFileError { file: String },

    /// A file that had to be read does not exist
    #[error("File does not exist: '{file}'.")]
    FileNotFound { file: String },

    /// Copying one file failed
    #[error("Error copying file from '{source_file}' to '{destination}': {source}.")]
    CopyError {
        source_file: PathBuf,
        destination: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Traversing the source tree failed
    #[error("Error walking source directory: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// The destination directory is present and overwriting was not requested
    #[error("Destination directory '{dest_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { dest_dir: String },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
