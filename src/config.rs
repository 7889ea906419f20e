//! Configuration handling for archetyper.
//! Loads the rules of a run from a JSON or YAML file and resolves them into a
//! validated [`CopyJob`].

use crate::error::{Error, Result};
use crate::filter::FilterRule;
use crate::mapping::Mapping;
use crate::path_mapper::{DotFileMasking, PathMapper, SegmentPathMapper};
use crate::processor::{CopyJob, HeaderWriter, NoHeader};
use crate::selection::{ClassificationPolicy, SelectionPolicy};
use crate::variable::Variable;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Supported configuration file names
pub const CONFIG_FILES: [&str; 3] = ["archetyper.json", "archetyper.yml", "archetyper.yaml"];

fn default_mask_dot_files() -> bool {
    true
}

/// The rules of one archetype generation run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Example project to turn into an archetype
    pub src_dir: PathBuf,
    /// Directory the archetype files are written to
    pub dest_dir: PathBuf,
    /// Expression for file names copied byte for byte
    #[serde(default)]
    pub binary_files: Option<String>,
    /// Expression for file names copied with token substitution
    #[serde(default)]
    pub text_files: Option<String>,
    #[serde(default)]
    pub path_mappings: Vec<Mapping>,
    #[serde(default)]
    pub text_file_mappings: Vec<Mapping>,
    #[serde(default)]
    pub file_includes: Vec<FilterRule>,
    #[serde(default)]
    pub file_excludes: Vec<FilterRule>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    /// Prefix destination file names starting with a dot with `_`
    #[serde(default = "default_mask_dot_files")]
    pub mask_dot_files: bool,
    /// Literal text written in front of every text file
    #[serde(default)]
    pub header: Option<String>,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Config {
    /// Parses configuration content, trying JSON first and YAML second.
    ///
    /// # Arguments
    /// * `content` - Raw configuration text
    /// * `origin` - Name of the source used in error messages
    /// * `base_dir` - Directory relative `src_dir`/`dest_dir` resolve against
    ///
    /// # Errors
    /// * `Error::ConfigParseError` if the content is neither valid JSON nor YAML,
    ///   or if a rule in it fails validation
    pub fn parse(content: &str, origin: &str, base_dir: &Path) -> Result<Self> {
        let mut config: Config = match serde_json::from_str(content) {
            Ok(config) => config,
            Err(_) => serde_yaml::from_str(content).map_err(|e| Error::ConfigParseError {
                file: origin.to_string(),
                reason: e.to_string(),
            })?,
        };
        config.base_dir = base_dir.to_path_buf();
        Ok(config)
    }

    /// Reads the configuration from a file or from the first supported file
    /// name found in a directory.
    ///
    /// # Errors
    /// * `Error::ConfigurationError` if no configuration file exists
    /// * `Error::ConfigParseError` if parsing fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = if path.is_dir() {
            CONFIG_FILES
                .iter()
                .map(|name| path.join(name))
                .find(|candidate| candidate.is_file())
                .ok_or_else(|| {
                    Error::ConfigurationError(format!(
                        "No configuration file found in '{}' (tried: {})",
                        path.display(),
                        CONFIG_FILES.join(", ")
                    ))
                })?
        } else {
            path.to_path_buf()
        };

        debug!("Loading configuration from {}", file.display());
        let content = std::fs::read_to_string(&file).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound { file: file.display().to_string() },
            _ => Error::IoError(e),
        })?;
        let base_dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&content, &file.display().to_string(), &base_dir)
    }

    pub fn src_dir(&self) -> PathBuf {
        self.resolve(&self.src_dir)
    }

    pub fn dest_dir(&self) -> PathBuf {
        self.resolve(&self.dest_dir)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn classification(&self) -> Result<ClassificationPolicy> {
        ClassificationPolicy::from_patterns(self.binary_files.as_deref(), self.text_files.as_deref())
    }

    /// Resolves the configuration into a copy job writing into `dest_dir`.
    ///
    /// Mappings without own patterns only apply to files matching the text
    /// file expression.
    pub fn copy_job(&self) -> Result<CopyJob> {
        let classification = self.classification()?;
        let default_name_pattern = Some(classification.text().clone());
        let segments = SegmentPathMapper::new(self.path_mappings.clone());
        let path_mapper: Box<dyn PathMapper> = if self.mask_dot_files {
            Box::new(DotFileMasking::new(segments))
        } else {
            Box::new(segments)
        };
        let header: Box<dyn HeaderWriter> = match &self.header {
            Some(header) => Box::new(header.clone()),
            None => Box::new(NoHeader),
        };
        let destination_root = self.dest_dir();

        Ok(CopyJob {
            source_root: self.src_dir(),
            recording_root: destination_root.clone(),
            destination_root,
            selection: SelectionPolicy::new(
                self.file_includes.clone(),
                self.file_excludes.clone(),
                classification,
            ),
            path_mapper,
            mappings: self.text_file_mappings.clone(),
            default_name_pattern,
            header,
        })
    }
}
