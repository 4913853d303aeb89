//! Configuration file loading and parsing
//!
//! Loads configuration from `~/.config/sfp/config.toml`

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Main configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// General settings
    pub general: GeneralConfig,
    /// Title resources: id -> text
    pub titles: HashMap<String, String>,
}

/// General picker settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Folder above which Up is disabled (default: home directory)
    pub storage_root: Option<PathBuf>,
    /// Composite mode name, e.g. "file-and-folder-multi-choice"
    pub mode: Option<String>,
    /// Allow narrowing the list by typing
    pub filterable: bool,
    /// Highlight the matched part of names while filtering
    pub highlight: bool,
    /// Output format: "lines", "null", "json"
    pub output_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            storage_root: None,
            mode: None,
            filterable: false,
            highlight: true,
            output_format: "lines".to_string(),
        }
    }
}

impl ConfigFile {
    /// Get the config directory path (~/.config/sfp)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sfp"))
    }

    /// Get the config file path (~/.config/sfp/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                if path.exists() {
                    fs::read_to_string(&path).ok()
                } else {
                    None
                }
            })
            .and_then(|content| match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring unparsable config file");
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load configuration from a specific path (for testing)
    pub fn load_from(path: &PathBuf) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }
}
