//! Configuration file support.
//!
//! This module reads lookup defaults and an optional dataset override from a
//! TOML file:
//!
//! ```toml
//! [lookup]
//! default_timezone = "Australia/Brisbane"
//!
//! [dataset]
//! path = "data/lunar_phases.json"
//! ```

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{PhaseError, PhaseResult};
use crate::table::PhaseTable;
use crate::time::{resolve_timezone, DEFAULT_TIMEZONE};

/// File name searched for by [`PhaseConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "moonphase.toml";

/// Configuration loaded from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseConfig {
    #[serde(default)]
    pub lookup: LookupSettings,
    #[serde(default)]
    pub dataset: DatasetSettings,
}

/// Lookup defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupSettings {
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
}

/// Dataset source settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSettings {
    /// Phase table to load instead of the bundled one.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            default_timezone: default_timezone(),
        }
    }
}

impl FromStr for PhaseConfig {
    type Err = PhaseError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        toml::from_str(content)
            .map_err(|e| PhaseError::Config(format!("Failed to parse config file: {}", e)))
    }
}

impl PhaseConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(PhaseConfig)` if successful
    /// * `Err(PhaseError::Config)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> PhaseResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PhaseError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let mut config: PhaseConfig = content.parse()?;

        // Relative dataset paths are taken relative to the config file.
        if let (Some(dataset), Some(dir)) = (config.dataset.path.as_ref(), path.as_ref().parent()) {
            if dataset.is_relative() {
                config.dataset.path = Some(dir.join(dataset));
            }
        }

        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `moonphase.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(PhaseConfig))` if found and parsed successfully
    /// * `Ok(None)` if no config file exists
    /// * `Err(PhaseError::Config)` if a file exists but cannot be parsed
    pub fn from_default_location() -> PhaseResult<Option<Self>> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("rust_backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Using configuration from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// The configured default timezone, checked against the tz database.
    pub fn default_timezone(&self) -> PhaseResult<Tz> {
        resolve_timezone(&self.lookup.default_timezone)
    }

    /// Load the configured phase table, or the bundled one when unset.
    pub fn load_table(&self) -> PhaseResult<PhaseTable> {
        match &self.dataset.path {
            Some(path) => PhaseTable::from_path(path),
            None => PhaseTable::bundled(),
        }
    }
}
