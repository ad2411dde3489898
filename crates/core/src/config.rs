//! Application configuration
//!
//! Optional TOML file. Lookup order:
//! 1. `GROUPLAUNCH_CONFIG` environment variable
//! 2. `grouplaunch.toml` in the working directory
//! 3. `config.toml` in the platform config directory
//!
//! A missing file means defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::paths::PathNormalizer;

pub const CONFIG_ENV_VAR: &str = "GROUPLAUNCH_CONFIG";
pub const LOCAL_CONFIG_FILE: &str = "grouplaunch.toml";
pub const DEFAULT_GROUPS_FILE: &str = "apps_groups.json";
pub const DEFAULT_GROUP_NAME: &str = "Default Group";

/// Platform directory identity (qualifier, organization, application)
const PROJECT_QUALIFIER: &str = "org";
const PROJECT_ORGANIZATION: &str = "grouplaunch";
const PROJECT_APPLICATION: &str = "grouplaunch";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Groups file; relative paths are taken from the working directory
    pub groups_file: PathBuf,
    /// Name of the group created on first run
    pub default_group: String,
    /// Lower-case stored paths (defaults to the platform convention)
    pub fold_case: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            groups_file: PathBuf::from(DEFAULT_GROUPS_FILE),
            default_group: DEFAULT_GROUP_NAME.to_string(),
            fold_case: None,
        }
    }
}

impl AppConfig {
    /// Find and load the config file, or fall back to defaults
    pub fn load() -> Result<Self> {
        match Self::locate() {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// First existing config file in lookup order
    pub fn locate() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }

        Self::user_config_path().filter(|p| p.is_file())
    }

    /// Platform config file location (may not exist)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        if config.default_group.trim().is_empty() {
            return Err(Error::Config("default_group must not be empty".to_string()));
        }
        Ok(config)
    }

    pub fn normalizer(&self) -> PathNormalizer {
        match self.fold_case {
            Some(fold) => PathNormalizer::new(fold),
            None => PathNormalizer::default(),
        }
    }
}
