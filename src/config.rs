//! Application configuration
//!
//! Defaults target the public iTunes Search endpoint. An optional
//! `config.json` in the user's config directory overrides them, and the
//! `TUNESEARCH_ENDPOINT` / `TUNESEARCH_MEDIA` environment variables
//! override both.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_DIR: &str = "tunesearch";
const CONFIG_FILE: &str = "config.json";

pub const ENDPOINT_VAR: &str = "TUNESEARCH_ENDPOINT";
pub const MEDIA_VAR: &str = "TUNESEARCH_MEDIA";

pub const DEFAULT_ENDPOINT: &str = "https://itunes.apple.com/search";
pub const DEFAULT_MEDIA: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search endpoint, without a query string
    pub endpoint: String,
    /// Value of the `media` query parameter
    pub media: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            media: DEFAULT_MEDIA.to_string(),
        }
    }
}

impl Config {
    /// Load the configuration, falling back to defaults on any problem
    pub fn load() -> Self {
        let mut config = match config_path() {
            Some(path) => Self::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!("{} (using defaults)", e);
                None
            }),
            None => None,
        }
        .unwrap_or_default();

        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Read a config file. A missing file yields `Ok(None)`.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Loaded config from {:?}", path);
        Ok(Some(config))
    }

    /// Apply environment overrides; `lookup` is `std::env::var` outside tests
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup(ENDPOINT_VAR).filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
        if let Some(media) = lookup(MEDIA_VAR).filter(|v| !v.trim().is_empty()) {
            self.media = media.trim().to_string();
        }
    }
}

/// `<config_dir>/tunesearch/config.json`, if the platform has a config dir
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}
