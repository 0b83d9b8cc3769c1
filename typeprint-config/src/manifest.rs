//! Declarative printer manifests.
//!
//! A manifest lists printers to register, in file order:
//!
//! ```yaml
//! printers:
//!   - name: libstdc++
//!     enabled: true
//!     subprinters:
//!       - name: vector
//!         pattern: '^std::vector<.*>$'
//!         factory: vector
//!   - function: lookup_qstring
//! ```
//!
//! The shapes here are deliberately loose: `name` is an arbitrary YAML value
//! and every capability is optional, so that a malformed declaration survives
//! parsing and is rejected by registration with a precise reason.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;

use crate::error::ConfigError;

fn default_true() -> bool {
    true
}

/// A manifest file: an ordered list of printer declarations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestFile {
    #[serde(default)]
    pub printers: Vec<PrinterDecl>,
}

/// One printer as declared in a manifest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrinterDecl {
    /// Printer name. Kept untyped; registration rejects non-string names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    /// Initial enabled state. Required whenever `name` is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Regex-selected subprinters, making this a collection printer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subprinters: Option<Vec<SubprinterDecl>>,

    /// Identifier of a lookup function in the host's catalog.
    ///
    /// Without a `name`, the declaration is a legacy lookup function and the
    /// identifier doubles as its implicit name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

/// One regex-keyed subprinter of a collection printer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubprinterDecl {
    pub name: String,

    /// Regex searched (unanchored) in the value's basic type name.
    pub pattern: String,

    /// Identifier of the formatter factory in the host's catalog.
    pub factory: String,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl ManifestFile {
    /// Read and parse the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("Loading printer manifest from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse manifest YAML from a string.
    pub fn parse(contents: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(contents)
    }

    /// Every function and factory identifier referenced by the manifest.
    pub fn referenced_functions(&self) -> BTreeSet<&str> {
        let mut ids = BTreeSet::new();
        for printer in &self.printers {
            if let Some(function) = &printer.function {
                ids.insert(function.as_str());
            }
            for sub in printer.subprinters.iter().flatten() {
                ids.insert(sub.factory.as_str());
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
printers:
  - name: libstdc++
    enabled: true
    subprinters:
      - name: vector
        pattern: '^std::vector<.*>$'
        factory: vector
      - name: map
        pattern: '^std::map<.*>$'
        factory: map
        enabled: false
  - function: lookup_qstring
"#;

    #[test]
    fn test_parse_sample() {
        let manifest = ManifestFile::parse(SAMPLE).unwrap();
        assert_eq!(manifest.printers.len(), 2);

        let collection = &manifest.printers[0];
        assert_eq!(collection.name, Some(Value::String("libstdc++".to_string())));
        assert_eq!(collection.enabled, Some(true));
        let subs = collection.subprinters.as_ref().unwrap();
        assert_eq!(subs.len(), 2);
        assert!(subs[0].enabled);
        assert!(!subs[1].enabled);

        let legacy = &manifest.printers[1];
        assert!(legacy.name.is_none());
        assert!(legacy.enabled.is_none());
        assert_eq!(legacy.function.as_deref(), Some("lookup_qstring"));
    }

    #[test]
    fn test_non_string_name_survives_parsing() {
        let manifest = ManifestFile::parse("printers:\n  - name: 42\n    enabled: true\n").unwrap();
        assert!(matches!(manifest.printers[0].name, Some(Value::Number(_))));
    }

    #[test]
    fn test_referenced_functions() {
        let manifest = ManifestFile::parse(SAMPLE).unwrap();
        let ids: Vec<&str> = manifest.referenced_functions().into_iter().collect();
        assert_eq!(ids, vec!["lookup_qstring", "map", "vector"]);
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = ManifestFile::parse("{}").unwrap();
        assert!(manifest.printers.is_empty());
    }
}
