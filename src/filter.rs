//! File include/exclude rules.

use crate::error::{Error, Result};
use crate::pattern::{path_and_name_match, Pattern};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Predicate over a relative path and its file name.
///
/// The path pattern is tested against the whole slash-normalized relative
/// path, the name pattern against the file name only. A rule without any
/// pattern matches every path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "RawFilterRule")]
pub struct FilterRule {
    path_pattern: Option<Pattern>,
    name_pattern: Option<Pattern>,
}

#[derive(Deserialize)]
struct RawFilterRule {
    path: Option<String>,
    file: Option<String>,
}

impl TryFrom<RawFilterRule> for FilterRule {
    type Error = Error;

    fn try_from(raw: RawFilterRule) -> Result<Self> {
        FilterRule::new(raw.path.as_deref(), raw.file.as_deref())
    }
}

impl FilterRule {
    /// Creates a rule from an optional path and an optional name expression.
    ///
    /// # Errors
    /// * `Error::ConfigurationError` if one of the expressions does not compile
    pub fn new(path_pattern: Option<&str>, name_pattern: Option<&str>) -> Result<Self> {
        Ok(Self {
            path_pattern: Pattern::optional(path_pattern)?,
            name_pattern: Pattern::optional(name_pattern)?,
        })
    }

    pub fn path_pattern(&self) -> Option<&Pattern> {
        self.path_pattern.as_ref()
    }

    pub fn name_pattern(&self) -> Option<&Pattern> {
        self.name_pattern.as_ref()
    }

    pub fn applies(&self, path: &Path) -> bool {
        path_and_name_match(self.path_pattern.as_ref(), self.name_pattern.as_ref(), path)
    }
}

impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.path_pattern, &self.name_pattern) {
            (None, None) => write!(f, "FilterRule [*]"),
            (Some(path), None) => write!(f, "FilterRule [path={path}]"),
            (None, Some(name)) => write!(f, "FilterRule [file={name}]"),
            (Some(path), Some(name)) => write!(f, "FilterRule [path={path}, file={name}]"),
        }
    }
}
