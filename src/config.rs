//! Per-user configuration.
//!
//! A small TOML file in the home directory; a missing file simply means
//! defaults. Only settings that outlive a single invocation belong here —
//! everything job-specific comes from the command line.
//!
//! ```toml
//! # ~/.mvnwatch.toml
//! maven-home = "/opt/maven"
//! debounce-ms = 400
//! ```

use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the user's home directory.
pub const FILE_NAME: &str = ".mvnwatch.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings loaded from [`FILE_NAME`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Maven installation directory; `<maven-home>/bin/mvn` is executed.
    pub maven_home: PathBuf,
    /// Quiet window after a change notification before a build triggers.
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self { maven_home: PathBuf::from("/usr"), debounce_ms: 250 }
    }
}

impl Config {
    /// Load the config from the user's home directory.
    ///
    /// No home directory or no config file falls back to defaults; an
    /// unreadable or malformed file is an error.
    pub fn load() -> Result<Config, ConfigError> {
        match dirs::home_dir() {
            Some(home) => Config::load_from(&home.join(FILE_NAME)),
            None => {
                log::warn!("could not determine the home directory; using default config");
                Ok(Config::default())
            }
        }
    }

    /// Load the config from an explicit path. Missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => return Err(ConfigError::Io { path: path.to_path_buf(), source }),
        };
        toml::from_str(&raw).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }
}
