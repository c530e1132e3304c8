//! Settings for the CLI: defaults, then an optional YAML file, then
//! environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::redirect::{DEFAULT_EDIT_PATH, DEFAULT_STATUS_CODE};

/// Config file read from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "redirect-source.yaml";

/// Settings loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid YAML for [`Settings`].
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// YAML error.
        #[source]
        source: serde_yaml::Error,
    },
    /// A setting has an unusable value.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// Setting name.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

fn default_store_root() -> PathBuf {
    PathBuf::from(".redirects")
}

fn default_log_filter() -> String {
    "warn".to_string()
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root directory of the file redirect store.
    pub store_root: PathBuf,
    /// Edit-form path for a redirect; `{id}` is replaced with its id.
    pub edit_path_template: String,
    /// Status code for created redirects.
    pub status_code: u16,
    /// `tracing` filter directive used when `REDIRECT_LOG` is unset.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_root: default_store_root(),
            edit_path_template: DEFAULT_EDIT_PATH.to_string(),
            status_code: DEFAULT_STATUS_CODE,
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Loads settings from `.env`, the config file and the process
    /// environment.
    ///
    /// The config file is `REDIRECT_CONFIG` if set, otherwise
    /// [`DEFAULT_CONFIG_FILE`] when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is unreadable or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is fine.
        let _ = dotenvy::dotenv();

        let file = match std::env::var("REDIRECT_CONFIG") {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => {
                Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|path| path.exists())
            }
        };
        Self::from_sources(file.as_deref(), |key| std::env::var(key).ok())
    }

    /// Builds settings from an optional YAML file and an environment lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable or a value is invalid.
    pub fn from_sources<F>(file: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(root) = env("REDIRECT_STORE") {
            settings.store_root = PathBuf::from(root);
        }
        if let Some(template) = env("REDIRECT_EDIT_PATH") {
            settings.edit_path_template = template;
        }
        if let Some(filter) = env("REDIRECT_LOG") {
            settings.log_filter = filter;
        }

        settings.validate()?;
        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&contents)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Checks values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.edit_path_template.contains("{id}") {
            return Err(ConfigError::InvalidValue {
                field: "edit_path_template".into(),
                reason: format!("'{}' has no {{id}} placeholder", self.edit_path_template),
            });
        }
        if !(300..400).contains(&self.status_code) {
            return Err(ConfigError::InvalidValue {
                field: "status_code".into(),
                reason: format!("{} is not a redirect status", self.status_code),
            });
        }
        if self.store_root.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store_root".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
