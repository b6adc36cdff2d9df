//! Editor configuration persisted as JSON in the user's config directory.

use std::path::{Path, PathBuf};

use mailsmith_client::ClientConfig;
use mailsmith_core::Language;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// Log filter used when neither `RUST_LOG` nor the config provides one.
pub const DEFAULT_LOG_FILTER: &str = "mailsmith=debug,mailsmith_core=info,mailsmith_client=info";

/// Settings that persist across editor sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// API connection settings.
    pub api: ClientConfig,
    /// Language selected when an editor opens.
    pub default_language: Language,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            api: ClientConfig::default(),
            default_language: Language::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Location of the configuration file.
#[must_use]
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailsmith")
        .join("config.json")
}

impl EditorConfig {
    /// Loads the configuration from [`config_path`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        Self::load_from(&config_path()).await
    }

    /// Loads the configuration from `path`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_from(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Saves the configuration to [`config_path`].
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save(&self) -> Result<()> {
        self.save_to(&config_path()).await
    }

    /// Saves the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        info!("Config saved to {:?}", path);
        Ok(())
    }
}
