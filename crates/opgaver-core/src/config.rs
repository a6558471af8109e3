//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! the gateway URL, the output directory, and the username and school used
//! for the last successful login (offered as prompt defaults). The password
//! is never stored.
//!
//! Configuration is stored at `~/.config/opgaver/config.json`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::client::{DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::download::ROOT_DIR;

/// Application name used for config directory paths
const APP_NAME: &str = "opgaver";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the remembered username
pub const USERNAME_ENV: &str = "LECTIO_USERNAME";

/// Environment variable overriding the gateway base URL
pub const BASE_URL_ENV: &str = "LECTIO_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub last_username: Option<String>,
    pub last_school_id: Option<String>,
    pub base_url: String,
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            last_username: None,
            last_school_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(ROOT_DIR),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply `LECTIO_USERNAME` and `LECTIO_BASE_URL` from the environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(std::env::var(USERNAME_ENV).ok(), std::env::var(BASE_URL_ENV).ok());
    }

    fn apply_overrides(&mut self, username: Option<String>, base_url: Option<String>) {
        if let Some(username) = username.filter(|u| !u.trim().is_empty()) {
            self.last_username = Some(username);
        }
        if let Some(base_url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = base_url;
        }
    }

    /// Remember who logged in, for the next run's prompts
    pub fn remember_login(&mut self, username: &str, school_id: &str) {
        self.last_username = Some(username.to_string());
        self.last_school_id = Some(school_id.to_string());
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
