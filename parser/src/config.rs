//! Known spec registry.
//!
//! Each known spec names the wiki page holding its testable statements, the
//! base URL that `Reference:` fragments resolve against, and optionally a
//! code fragment template that wraps every example. Two specs are built in;
//! a YAML file can add more or override them by name.
//!
//! # Example YAML
//!
//! ```yaml
//! wiki_api: https://www.w3.org/wiki/api.php
//! specs:
//!   - name: core-aam
//!     title: Core_AAM_1.1_Testable_Statements
//!     spec_url: https://www.w3.org/TR/core-aam-1.1/
//!   - name: svg
//!     title: SVG_Accessibility/Testing/Test_Assertions_with_Tables_for_ATTA
//!     spec_url: https://www.w3.org/TR/svg-aam-1.0/
//!     fragment: '<svg xmlns="http://www.w3.org/2000/svg">%code%</svg>'
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::source::DEFAULT_WIKI_API;

/// One spec whose statements can be generated by name.
///
/// # Examples
///
/// ```
/// # use testable_statements_parser::config::SpecRegistry;
/// let registry = SpecRegistry::builtin();
/// let aria = registry.find("aria11").unwrap();
/// assert_eq!(aria.title, "ARIA_1.1_Testable_Statements");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownSpec {
    /// Short name used on the command line.
    pub name: String,
    /// Wiki page title holding the statements.
    pub title: String,
    /// Base URL for `Reference:` fragments.
    pub spec_url: String,
    /// Template wrapping each example; `%code%` marks the insertion point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

/// Set of known specs plus the wiki API they are fetched from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecRegistry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wiki_api: Option<String>,
    #[serde(default)]
    pub specs: Vec<KnownSpec>,
}

impl SpecRegistry {
    /// The specs available without any configuration file.
    pub fn builtin() -> Self {
        Self {
            wiki_api: None,
            specs: vec![
                KnownSpec {
                    name: "aria11".to_string(),
                    title: "ARIA_1.1_Testable_Statements".to_string(),
                    spec_url: "https://www.w3.org/TR/wai-aria-1.1/".to_string(),
                    fragment: None,
                },
                KnownSpec {
                    name: "svg".to_string(),
                    title: "SVG_Accessibility/Testing/Test_Assertions_with_Tables_for_ATTA"
                        .to_string(),
                    spec_url: "https://www.w3.org/TR/svg-aam-1.0/".to_string(),
                    fragment: Some(
                        "<svg xmlns=\"http://www.w3.org/2000/svg\">%code%</svg>".to_string(),
                    ),
                },
            ],
        }
    }

    /// Loads a registry from a YAML file, without the built-in specs.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](GenerationError::IoError) if the file cannot be
    /// read, or [`YamlError`](GenerationError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let registry = serde_yaml::from_reader(reader)?;
        Ok(registry)
    }

    /// Built-in specs overlaid with the ones from `path`, when given.
    pub fn load_with_builtins(path: Option<&Path>) -> Result<Self> {
        let mut registry = Self::builtin();
        if let Some(path) = path {
            registry.merge(Self::load(path)?);
        }
        Ok(registry)
    }

    /// Adds `other`'s specs, replacing same-named entries in place.
    pub fn merge(&mut self, other: SpecRegistry) {
        if other.wiki_api.is_some() {
            self.wiki_api = other.wiki_api;
        }
        for spec in other.specs {
            match self.specs.iter_mut().find(|existing| existing.name == spec.name) {
                Some(existing) => *existing = spec,
                None => self.specs.push(spec),
            }
        }
    }

    pub fn find(&self, name: &str) -> Option<&KnownSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Like [`find`](Self::find), but with an error naming the known specs.
    pub fn require(&self, name: &str) -> Result<&KnownSpec> {
        self.find(name).ok_or_else(|| GenerationError::UnknownSpec {
            name: name.to_string(),
            known: self.names().join(", "),
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.specs.iter().map(|spec| spec.name.as_str()).collect()
    }

    /// Wiki API endpoint, falling back to [`DEFAULT_WIKI_API`].
    pub fn wiki_api(&self) -> &str {
        self.wiki_api.as_deref().unwrap_or(DEFAULT_WIKI_API)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_specs() {
        let registry = SpecRegistry::builtin();
        assert_eq!(registry.names(), vec!["aria11", "svg"]);
        assert!(registry.find("svg").unwrap().fragment.is_some());
        assert_eq!(registry.wiki_api(), DEFAULT_WIKI_API);
    }

    #[test]
    fn test_yaml_overrides_and_extends_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("specs.yaml");
        std::fs::write(
            &path,
            r#"
wiki_api: https://wiki.example.org/api.php
specs:
  - name: aria11
    title: ARIA_1.1_Testable_Statements_Draft
    spec_url: https://w3c.github.io/aria/
  - name: core-aam
    title: Core_AAM_1.1_Testable_Statements
    spec_url: https://www.w3.org/TR/core-aam-1.1/
"#,
        )
        .unwrap();

        let registry = SpecRegistry::load_with_builtins(Some(&path)).unwrap();
        assert_eq!(registry.names(), vec!["aria11", "svg", "core-aam"]);
        assert_eq!(
            registry.find("aria11").unwrap().spec_url,
            "https://w3c.github.io/aria/"
        );
        assert_eq!(registry.wiki_api(), "https://wiki.example.org/api.php");
    }

    #[test]
    fn test_unknown_spec_lists_known_names() {
        let err = SpecRegistry::builtin().require("html-aam").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown spec 'html-aam' (known: aria11, svg)"
        );
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "specs: [name: {").unwrap();
        assert!(matches!(
            SpecRegistry::load(&path),
            Err(GenerationError::YamlError(_))
        ));
    }
}
