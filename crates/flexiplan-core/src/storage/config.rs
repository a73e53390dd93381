//! Configuration management
//!
//! Priority for the server URL: CLI argument > config.toml > FLEXIPLAN_URL.

use super::Result;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const URL_ENV_VAR: &str = "FLEXIPLAN_URL";
const CONFIG_FILE_NAME: &str = "config.toml";
const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// Where the session credentials are persisted
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CredentialBackend {
    /// OS keychain
    #[default]
    Keyring,
    /// `credentials.json` next to the config file
    File,
}

impl std::fmt::Display for CredentialBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialBackend::Keyring => write!(f, "keyring"),
            CredentialBackend::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for CredentialBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keyring" => Ok(CredentialBackend::Keyring),
            "file" => Ok(CredentialBackend::File),
            other => Err(format!(
                "unknown credential backend '{}', expected 'keyring' or 'file'",
                other
            )),
        }
    }
}

/// Application configuration
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Backend base URL, e.g. `https://api.flexiplan.example`
    pub url: Option<String>,
    /// Per-request timeout. Unset means the HTTP client's own default.
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub credential_backend: CredentialBackend,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("Failed to parse config file: {}", e),
            })?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    /// `~/.config/flexiplan`
    pub fn default_dir() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(home_dir.join(".config").join("flexiplan"))
    }

    fn config_file_path() -> Result<PathBuf> {
        Ok(Self::default_dir()?.join(CONFIG_FILE_NAME))
    }

    pub fn config_file_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE_NAME)
    }

    pub fn credentials_file_in(dir: &Path) -> PathBuf {
        dir.join(CREDENTIALS_FILE_NAME)
    }

    /// Get URL with fallback to environment variable
    pub fn get_url(&self) -> Option<String> {
        self.url
            .clone()
            .or_else(|| std::env::var(URL_ENV_VAR).ok().filter(|s| !s.is_empty()))
    }

    pub fn set_url(&mut self, url: String) {
        self.url = Some(url);
    }
}
