use crate::constants::{
    API_URL_ENV, CONFIG_DIR_NAME, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, LOG_FILE_NAME,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.yaml";
const CREDENTIALS_FILE: &str = "credentials.yaml";

/// User configuration loaded from `config.yaml`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: String::from(DEFAULT_API_URL),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: String::from("info"),
        }
    }
}

/// Persisted token pair, keyed the same way the web client keyed local storage
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredCredentials {
    #[serde(rename = "accessToken", default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(rename = "refreshToken", default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Manages the config directory: settings, credentials and the log file
#[derive(Clone, Debug)]
pub struct Storage {
    config_dir: PathBuf,
}

impl Storage {
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME);
        Storage { config_dir }
    }

    pub fn at(config_dir: impl Into<PathBuf>) -> Self {
        Storage {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_file_name(&self) -> &'static str {
        LOG_FILE_NAME
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir)
                .with_context(|| format!("creating {}", self.config_dir.display()))?;
        }
        Ok(())
    }

    /// Load settings, falling back to defaults, then apply the env override
    pub fn load_config(&self) -> Result<Config> {
        let path = self.config_dir.join(CONFIG_FILE);
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_yaml::from_str::<Config>(&content)
                .with_context(|| format!("parsing {}", path.display()))?
        } else {
            Config::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    /// Read stored tokens; a missing or unreadable file means signed out
    pub fn load_credentials(&self) -> StoredCredentials {
        let path = self.config_dir.join(CREDENTIALS_FILE);
        fs::read_to_string(&path)
            .ok()
            .and_then(|content| serde_yaml::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn save_credentials(&self, credentials: &StoredCredentials) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_yaml::to_string(credentials)?;
        fs::write(self.config_dir.join(CREDENTIALS_FILE), content)?;
        Ok(())
    }

    pub fn clear_credentials(&self) -> Result<()> {
        let path = self.config_dir.join(CREDENTIALS_FILE);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
