use linq_builder::{StoreOptions, DEFAULT_HISTORY_LIMIT, DEFAULT_THEME_ID};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = "linq.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Linq configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Undo levels kept per page
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_page_name")]
    pub default_page_name: String,

    #[serde(default = "default_slug")]
    pub default_slug: String,

    /// Theme preset id new pages start with
    #[serde(default = "default_theme")]
    pub default_theme: String,

    /// Where `replay` writes the final snapshot
    #[serde(default = "default_out_file")]
    pub out_file: String,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_page_name() -> String {
    StoreOptions::default().default_page_name
}

fn default_slug() -> String {
    StoreOptions::default().default_slug
}

fn default_theme() -> String {
    DEFAULT_THEME_ID.to_string()
}

fn default_out_file() -> String {
    "linq.snapshot.json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> Result<Self, ConfigError> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            history_limit: self.history_limit,
            default_page_name: self.default_page_name.clone(),
            default_slug: self.default_slug.clone(),
            default_theme: self.default_theme.clone(),
            ..StoreOptions::default()
        }
    }

    /// Get absolute path of the snapshot output
    pub fn get_out_file(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            default_page_name: default_page_name(),
            default_slug: default_slug(),
            default_theme: default_theme(),
            out_file: default_out_file(),
        }
    }
}
