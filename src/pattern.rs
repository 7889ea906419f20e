//! Whole-input regular expressions and the path helpers shared by filters,
//! mappings and classification.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::path::Path;

/// A regular expression that must match its entire input.
///
/// The authored expression is kept for display and serialization; the
/// compiled form is anchored at both ends.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `expr` as a whole-input pattern.
    ///
    /// # Errors
    /// * `Error::ConfigurationError` if the expression is not a valid regex
    pub fn new(expr: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{expr})$")).map_err(|e| {
            Error::ConfigurationError(format!("invalid pattern '{expr}': {e}"))
        })?;
        Ok(Self { source: expr.to_string(), regex })
    }

    /// Compiles an optional, possibly blank expression.
    ///
    /// Blank expressions are treated as absent.
    pub fn optional(expr: Option<&str>) -> Result<Option<Self>> {
        match expr.map(str::trim) {
            Some(expr) if !expr.is_empty() => Self::new(expr).map(Some),
            _ => Ok(None),
        }
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// The expression as it was authored.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Returns the path with every component joined by `/`.
pub fn slash_path(path: &Path) -> String {
    let normalized = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        normalized.into_owned()
    } else {
        normalized.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Returns the final component of the path, or an empty string.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Tests an optional path pattern and an optional name pattern against a path.
///
/// Absent patterns do not constrain the result; with both absent every path
/// matches.
pub(crate) fn path_and_name_match(
    path_pattern: Option<&Pattern>,
    name_pattern: Option<&Pattern>,
    path: &Path,
) -> bool {
    let path_ok = path_pattern.map_or(true, |p| p.is_match(&slash_path(path)));
    let name_ok = name_pattern.map_or(true, |p| p.is_match(&file_name(path)));
    path_ok && name_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matches_whole_input() {
        let pattern = Pattern::new(r".*\.md").unwrap();
        assert!(pattern.is_match("README.md"));
        assert!(!pattern.is_match("README.md.bak"));

        let pattern = Pattern::new("a|b").unwrap();
        assert!(pattern.is_match("a"));
        assert!(!pattern.is_match("ab"));
    }

    #[test]
    fn test_optional_blank_is_absent() {
        assert!(Pattern::optional(None).unwrap().is_none());
        assert!(Pattern::optional(Some("   ")).unwrap().is_none());
        assert_eq!(Pattern::optional(Some(" .*x ")).unwrap().unwrap().as_str(), ".*x");
    }

    #[test]
    fn test_invalid_pattern() {
        match Pattern::new("(") {
            Err(Error::ConfigurationError(msg)) => assert!(msg.contains("invalid pattern")),
            other => panic!("Expected ConfigurationError, got {other:?}"),
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("a/b/c.txt")), "c.txt");
        assert_eq!(file_name(Path::new(".abc")), ".abc");
        assert_eq!(file_name(Path::new("")), "");
    }
}
