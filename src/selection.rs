//! File selection and binary/text classification.

use crate::error::Result;
use crate::filter::FilterRule;
use crate::pattern::{file_name, Pattern};
use log::debug;
use std::path::Path;

/// Default expression for files copied byte for byte.
pub const DEFAULT_BINARY_FILES: &str = r".*\.(jar)";

/// Default expression for files copied with token substitution.
pub const DEFAULT_TEXT_FILES: &str = r".*\.(properties|md|java|xml)";

/// How a file is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Binary,
    Text,
    /// Neither pattern matched the file name.
    Unknown,
}

/// Binary and text file name patterns, resolved once before a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationPolicy {
    binary: Pattern,
    text: Pattern,
}

impl ClassificationPolicy {
    pub fn new(binary: Pattern, text: Pattern) -> Self {
        Self { binary, text }
    }

    /// Builds the policy from optional expressions, filling in the defaults.
    pub fn from_patterns(binary: Option<&str>, text: Option<&str>) -> Result<Self> {
        Ok(Self {
            binary: pattern_or_default(binary, DEFAULT_BINARY_FILES)?,
            text: pattern_or_default(text, DEFAULT_TEXT_FILES)?,
        })
    }

    pub fn binary(&self) -> &Pattern {
        &self.binary
    }

    pub fn text(&self) -> &Pattern {
        &self.text
    }

    /// Classifies a file by its name. The binary pattern is tested first.
    pub fn classify(&self, path: &Path) -> FileKind {
        let name = file_name(path);
        if self.binary.is_match(&name) {
            FileKind::Binary
        } else if self.text.is_match(&name) {
            FileKind::Text
        } else {
            FileKind::Unknown
        }
    }
}

fn pattern_or_default(expr: Option<&str>, default: &str) -> Result<Pattern> {
    match Pattern::optional(expr)? {
        Some(pattern) => Ok(pattern),
        None => Pattern::new(default),
    }
}

/// Decides which files of the source tree are copied and how.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    includes: Vec<FilterRule>,
    excludes: Vec<FilterRule>,
    classification: ClassificationPolicy,
}

impl SelectionPolicy {
    pub fn new(
        includes: Vec<FilterRule>,
        excludes: Vec<FilterRule>,
        classification: ClassificationPolicy,
    ) -> Self {
        Self { includes, excludes, classification }
    }

    pub fn classification(&self) -> &ClassificationPolicy {
        &self.classification
    }

    /// Returns whether the file at `relative_path` is copied.
    ///
    /// A matching include rule always wins; otherwise a matching exclude
    /// rule rejects the file; everything else is copied.
    pub fn should_copy(&self, relative_path: &Path) -> bool {
        if let Some(rule) = self.includes.iter().find(|rule| rule.applies(relative_path)) {
            debug!("File '{}' included by: {}", relative_path.display(), rule);
            return true;
        }
        if let Some(rule) = self.excludes.iter().find(|rule| rule.applies(relative_path)) {
            debug!("File '{}' excluded by: {}", relative_path.display(), rule);
            return false;
        }
        true
    }

    pub fn classify(&self, path: &Path) -> FileKind {
        self.classification.classify(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(path: Option<&str>, file: Option<&str>) -> FilterRule {
        FilterRule::new(path, file).unwrap()
    }

    fn default_classification() -> ClassificationPolicy {
        ClassificationPolicy::from_patterns(None, None).unwrap()
    }

    #[test]
    fn test_no_rules_copies_everything() {
        let policy = SelectionPolicy::new(vec![], vec![], default_classification());
        assert!(policy.should_copy(Path::new("a/b/c.txt")));
        assert!(policy.should_copy(Path::new(".gitignore")));
    }

    #[test]
    fn test_exclude_rejects() {
        let policy = SelectionPolicy::new(
            vec![],
            vec![rule(Some("target/.*"), None), rule(None, Some(r".*\.iml"))],
            default_classification(),
        );
        assert!(!policy.should_copy(Path::new("target/classes/A.class")));
        assert!(!policy.should_copy(Path::new("module/project.iml")));
        assert!(policy.should_copy(Path::new("src/A.java")));
    }

    #[test]
    fn test_include_wins_over_exclude() {
        let policy = SelectionPolicy::new(
            vec![rule(Some("target/keep/.*"), None)],
            vec![rule(Some("target/.*"), None)],
            default_classification(),
        );
        assert!(policy.should_copy(Path::new("target/keep/A.java")));
        assert!(!policy.should_copy(Path::new("target/drop/A.java")));
    }

    #[test]
    fn test_classification_defaults() {
        let classification = default_classification();
        assert_eq!(classification.classify(Path::new("lib/a.jar")), FileKind::Binary);
        assert_eq!(classification.classify(Path::new("src/A.java")), FileKind::Text);
        assert_eq!(classification.classify(Path::new("pom.xml")), FileKind::Text);
        assert_eq!(classification.classify(Path::new("image.png")), FileKind::Unknown);
    }

    #[test]
    fn test_classification_uses_name_only() {
        let classification = ClassificationPolicy::from_patterns(Some(r".*\.png"), Some("txt/.*")).unwrap();
        assert_eq!(classification.classify(Path::new("txt/notes")), FileKind::Unknown);
        assert_eq!(classification.classify(Path::new("jar/icon.png")), FileKind::Binary);
    }

    #[test]
    fn test_binary_checked_before_text() {
        let classification = ClassificationPolicy::from_patterns(Some(r".*\.bin"), Some(".*")).unwrap();
        assert_eq!(classification.classify(Path::new("data.bin")), FileKind::Binary);
        assert_eq!(classification.classify(Path::new("data.txt")), FileKind::Text);
    }
}
