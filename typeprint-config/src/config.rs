//! Host settings for the printer registry.
//!
//! Maps to `config.yaml`:
//!
//! ```yaml
//! verbose: true
//! manifests:
//!   - /usr/share/typeprint/libstdcxx.yaml
//! global_manifests:
//!   - ~/.config/typeprint/local.yaml
//! disabled:
//!   - "libstdc++;vector"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_verbose() -> bool {
    false
}

/// Top-level settings file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Emit a notice for every printer registration.
    #[serde(default = "default_verbose")]
    pub verbose: bool,

    /// Manifests loaded into their own module scope, labelled by file path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manifests: Vec<PathBuf>,

    /// Manifests whose printers are registered in the global scope.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global_manifests: Vec<PathBuf>,

    /// `printer` or `printer;subprinter` selections disabled after loading.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled: Vec<String>,
}

impl Config {
    /// Load and validate the settings file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            serde_yaml_ng::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the settings file from [`Config::default_path`], falling back to
    /// defaults when it does not exist.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                log::info!("Config file not found at {:?}, using defaults", path);
                Ok(Self::default())
            }
            None => {
                log::warn!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save the settings to `path`.
    ///
    /// Writes a temp file next to the target and renames it into place.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(io_err)?;
        fs::rename(&temp_path, path).map_err(io_err)?;
        Ok(())
    }

    /// `~/.config/typeprint/config.yaml` (platform config dir on Windows).
    pub fn default_path() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|dir| dir.join("typeprint").join("config.yaml"))
        }
        #[cfg(not(target_os = "windows"))]
        {
            dirs::home_dir().map(|home| home.join(".config").join("typeprint").join("config.yaml"))
        }
    }

    /// Check the disabled selections are well formed.
    ///
    /// A selection names a printer and at most one subprinter, so it may
    /// contain the `;` delimiter at most once and neither side may be empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for selection in &self.disabled {
            let mut parts = selection.split(';');
            let printer = parts.next().unwrap_or_default();
            let subprinter = parts.next();
            if parts.next().is_some() {
                return Err(ConfigError::Validation(format!(
                    "disabled selection '{selection}' contains more than one ';'"
                )));
            }
            if printer.is_empty() || subprinter.is_some_and(str::is_empty) {
                return Err(ConfigError::Validation(format!(
                    "disabled selection '{selection}' has an empty printer or subprinter part"
                )));
            }
        }
        Ok(())
    }
}
