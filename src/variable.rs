//! Derived template variables.
//!
//! A variable is computed from another archetype property by a fixed string
//! transformation, for example turning a package name into a directory path.
//! Rendering the variables into template syntax is left to the metadata
//! stage; this module only carries and validates them.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// String transformations available for derived variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transformation {
    /// Converts all dots to slashes.
    DotToSlash,
    /// Converts all slashes to dots.
    SlashToDot,
}

impl Transformation {
    pub fn apply(self, value: &str) -> String {
        match self {
            Self::DotToSlash => value.replace('.', "/"),
            Self::SlashToDot => value.replace('/', "."),
        }
    }

    /// The name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::DotToSlash => "DOT_2_SLASH",
            Self::SlashToDot => "SLASH_2_DOT",
        }
    }
}

impl FromStr for Transformation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DOT_2_SLASH" => Ok(Self::DotToSlash),
            "SLASH_2_DOT" => Ok(Self::SlashToDot),
            other => Err(Error::ConfigurationError(format!(
                "the transformation '{other}' does not exist"
            ))),
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A variable derived from the property `source` by `transform`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawVariable")]
pub struct Variable {
    name: String,
    source: String,
    transform: Transformation,
}

#[derive(Deserialize)]
struct RawVariable {
    name: Option<String>,
    source: Option<String>,
    transform: Option<String>,
}

impl TryFrom<RawVariable> for Variable {
    type Error = Error;

    fn try_from(raw: RawVariable) -> Result<Self> {
        let name = raw
            .name
            .ok_or_else(|| Error::ConfigurationError("a variable requires a 'name'".to_string()))?;
        let source = raw.source.ok_or_else(|| {
            Error::ConfigurationError(format!("variable '{name}' requires a 'source'"))
        })?;
        let transform = raw.transform.ok_or_else(|| {
            Error::ConfigurationError(format!("variable '{name}' requires a 'transform'"))
        })?;
        Variable::new(&name, &source, transform.parse()?)
    }
}

impl Variable {
    /// # Errors
    /// * `Error::ConfigurationError` if `name` or `source` is blank
    pub fn new(name: &str, source: &str, transform: Transformation) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::ConfigurationError("variable 'name' must not be empty".to_string()));
        }
        if source.trim().is_empty() {
            return Err(Error::ConfigurationError(format!(
                "variable '{name}' requires a non-empty 'source'"
            )));
        }
        Ok(Self { name: name.to_string(), source: source.to_string(), transform })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn transform(&self) -> Transformation {
        self.transform
    }

    /// Computes the variable's value from the value of its source property.
    pub fn derive(&self, source_value: &str) -> String {
        self.transform.apply(source_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transformations() {
        assert_eq!(Transformation::DotToSlash.apply("org.acme.app"), "org/acme/app");
        assert_eq!(Transformation::SlashToDot.apply("org/acme/app"), "org.acme.app");
        assert_eq!(Transformation::DotToSlash.apply("plain"), "plain");
    }

    #[test]
    fn test_parse_names() {
        for transform in [Transformation::DotToSlash, Transformation::SlashToDot] {
            assert_eq!(transform.name().parse::<Transformation>().unwrap(), transform);
        }
        assert!(matches!(
            "TO_CAMEL_CASE".parse::<Transformation>(),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_deserialize_variable() {
        let variable: Variable = serde_yaml::from_str(
            "name: pkgPath\nsource: package\ntransform: DOT_2_SLASH\n",
        )
        .unwrap();
        assert_eq!(variable.name(), "pkgPath");
        assert_eq!(variable.source(), "package");
        assert_eq!(variable.derive("org.acme"), "org/acme");
    }

    #[test]
    fn test_deserialize_variable_missing_transform() {
        let err = serde_json::from_str::<Variable>(r#"{"name": "a", "source": "b"}"#).unwrap_err();
        assert!(err.to_string().contains("requires a 'transform'"));
    }
}
