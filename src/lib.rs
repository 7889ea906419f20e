//! archetyper turns an example project into a parameterized project template.
//! It walks the example's source tree, copies binary files verbatim and text
//! files with tokens substituted, rewrites destination paths, and reports the
//! produced files for metadata generation.

/// Command-line interface module for archetyper
pub mod cli;

/// Configuration handling
/// Supports JSON and YAML formats (archetyper.json, archetyper.yml, archetyper.yaml)
pub mod config;

/// The files produced by a run
pub mod copy_result;

/// Error types and handling
pub mod error;

/// Include/exclude rules
pub mod filter;

/// Search/replace rules for paths and file content
pub mod mapping;

/// Source to destination path rewriting
pub mod path_mapper;

/// Whole-input regular expressions
pub mod pattern;

/// Core tree copy orchestration
pub mod processor;

/// File selection and binary/text classification
pub mod selection;

/// Streaming token substitution
pub mod substitution;

/// Derived template variables
pub mod variable;

pub use copy_result::CopyResult;
pub use error::{Error, Result};
pub use mapping::Mapping;
pub use processor::CopyJob;
