//! Search/replace rules used for both path rewriting and content substitution.

use crate::error::{Error, Result};
use crate::pattern::{file_name, path_and_name_match, Pattern};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Maps a literal search term to a literal replacement.
///
/// A mapping may be scoped to files whose relative path and/or file name
/// match the optional patterns. In configuration files the sequences `\r`,
/// `\n` and `\t` in `search` and `replace` stand for the corresponding
/// control characters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawMapping")]
pub struct Mapping {
    search: String,
    replace: String,
    path_pattern: Option<Pattern>,
    name_pattern: Option<Pattern>,
}

#[derive(Deserialize)]
struct RawMapping {
    search: String,
    replace: String,
    path: Option<String>,
    file: Option<String>,
}

impl TryFrom<RawMapping> for Mapping {
    type Error = Error;

    fn try_from(raw: RawMapping) -> Result<Self> {
        Mapping::scoped(
            &unescape(&raw.search),
            &unescape(&raw.replace),
            raw.path.as_deref(),
            raw.file.as_deref(),
        )
    }
}

impl Mapping {
    /// Creates a mapping that applies to every file.
    ///
    /// # Errors
    /// * `Error::ConfigurationError` if `search` or `replace` is blank
    pub fn new(search: &str, replace: &str) -> Result<Self> {
        Self::scoped(search, replace, None, None)
    }

    /// Creates a mapping restricted by a path and/or file name expression.
    ///
    /// # Errors
    /// * `Error::ConfigurationError` if `search` or `replace` is blank or if
    ///   one of the expressions does not compile
    pub fn scoped(
        search: &str,
        replace: &str,
        path_pattern: Option<&str>,
        name_pattern: Option<&str>,
    ) -> Result<Self> {
        if search.trim().is_empty() {
            return Err(Error::ConfigurationError(format!(
                "mapping 'search' must not be empty (replace='{replace}')"
            )));
        }
        if replace.trim().is_empty() {
            return Err(Error::ConfigurationError(format!(
                "mapping 'replace' must not be empty (search='{search}')"
            )));
        }
        Ok(Self {
            search: search.to_string(),
            replace: replace.to_string(),
            path_pattern: Pattern::optional(path_pattern)?,
            name_pattern: Pattern::optional(name_pattern)?,
        })
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn replace(&self) -> &str {
        &self.replace
    }

    pub fn path_pattern(&self) -> Option<&Pattern> {
        self.path_pattern.as_ref()
    }

    pub fn name_pattern(&self) -> Option<&Pattern> {
        self.name_pattern.as_ref()
    }

    /// Returns whether this mapping should be used for the given file.
    ///
    /// Without own patterns the mapping is unconditional, unless a default
    /// file name pattern is given; in that case the file name must match it.
    pub fn applies(&self, default_name_pattern: Option<&Pattern>, path: &Path) -> bool {
        if self.path_pattern.is_none() && self.name_pattern.is_none() {
            return default_name_pattern.map_or(true, |p| p.is_match(&file_name(path)));
        }
        path_and_name_match(self.path_pattern.as_ref(), self.name_pattern.as_ref(), path)
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mapping [search={:?}, replace={:?}", self.search, self.replace)?;
        if let Some(path) = &self.path_pattern {
            write!(f, ", path={path}")?;
        }
        if let Some(name) = &self.name_pattern {
            write!(f, ", file={name}")?;
        }
        f.write_str("]")
    }
}

fn unescape(value: &str) -> String {
    value.replace("\\r", "\r").replace("\\n", "\n").replace("\\t", "\t")
}
