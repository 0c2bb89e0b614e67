//! User configuration
//!
//! Stored as RON in the platform config directory. A missing file means
//! defaults; a malformed one is an error.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ui::input::{Action, KeyBindings};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("unknown key name: {0}")]
    UnknownKey(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the JSON game data
    pub data_dir: PathBuf,
    /// env_logger filter used when RUST_LOG is unset
    pub log_level: String,
    /// Action name to key names, replacing the defaults for that action
    pub keybindings: HashMap<Action, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("assets/data"),
            log_level: "info".to_string(),
            keybindings: HashMap::new(),
        }
    }
}

/// Where the config file lives
pub fn config_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "stitchwork", "Stitchwork") {
        proj_dirs.config_dir().join("config.ron")
    } else {
        PathBuf::from("./config.ron")
    }
}

impl Config {
    /// Load from `path`, or defaults if the file doesn't exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Keybindings with this config's overrides applied
    pub fn keybindings(&self) -> Result<KeyBindings, ConfigError> {
        let mut keys = KeyBindings::new();
        keys.apply_overrides(&self.keybindings)?;
        Ok(keys)
    }
}
