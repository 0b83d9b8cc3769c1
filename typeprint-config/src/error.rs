//! Typed error variants for the typeprint-config crate.

use std::path::PathBuf;

/// Errors that can occur when loading or saving configuration and manifests.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing a file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contained YAML that could not be parsed into the expected shape.
    #[error("YAML parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The value could not be serialized back to YAML.
    #[error("YAML serialization error: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("config validation error: {0}")]
    Validation(String),
}
