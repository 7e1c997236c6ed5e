//! CLI configuration
//!
//! Stored at `~/.chamcode/config.toml` next to the profile database.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Persistent CLI settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Profile ID selected with `chamcode init`
    #[serde(default)]
    pub active_profile: Option<String>,
}

impl Config {
    /// Global config directory (~/.chamcode)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".chamcode")
    }

    /// Path to the global config file
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Default location of the profile database
    pub fn default_db_path() -> PathBuf {
        Self::global_config_dir().join("chamcode.db")
    }

    /// Load the global config, defaulting when the file does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::global_config_path())
    }

    /// Load a config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save the global config
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::global_config_path())
    }

    /// Save to a specific path, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, raw)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            active_profile: Some("user-123".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.active_profile.as_deref(), Some("user-123"));
    }

    #[test]
    fn test_missing_file_defaults() {
        let dir = tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert!(loaded.active_profile.is_none());
    }
}
