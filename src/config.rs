use anyhow::{Context, Result};
use dirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::defaults;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where `run` exports results when `--output` is not given
    pub results_path: PathBuf,
    /// Log filter used when `CASELEDGER_LOG` is unset
    pub log_level: String,
    /// Prompt shown by the interactive result source
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from(defaults::DEFAULT_RESULTS_FILE),
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            prompt: defaults::DEFAULT_PROMPT.to_string(),
        }
    }
}

impl Config {
    pub async fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path).await
    }

    /// Load from `config_path`, writing the defaults there on first use
    pub async fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .await
                .context("Failed to read config file")?;

            let config: Config = toml::from_str(&contents)
                .context("Failed to parse config file")?;

            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path).await?;
            Ok(config)
        }
    }

    pub async fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path).await
    }

    pub async fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).await
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(config_path, contents).await
            .context("Failed to write config file")?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("caseledger");

        Ok(config_dir.join(defaults::DEFAULT_CONFIG_NAME))
    }
}
