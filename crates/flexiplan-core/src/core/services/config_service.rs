//! Configuration service for reading and updating `config.toml`

use crate::AppError;
use crate::error::{CliError, ConfigError};
use crate::storage::config::{Config, CredentialBackend, URL_ENV_VAR};
use crate::utils::validation::validate_url;
use std::path::PathBuf;
use std::time::Duration;

/// Keys accepted by `config set`
pub const SETTABLE_KEYS: [&str; 3] = ["url", "timeout_seconds", "credential_backend"];

pub struct ConfigService {
    config: Config,
}

impl ConfigService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn get_url(&self) -> Option<String> {
        self.config.get_url()
    }

    /// Server URL, failing with a hint when none is configured
    pub fn require_url(&self) -> Result<String, AppError> {
        self.get_url().ok_or_else(|| {
            ConfigError::MissingField {
                field: "url".to_string(),
                hint: format!(
                    "Run 'flexiplan config set url <URL>' or set {}",
                    URL_ENV_VAR
                ),
            }
            .into()
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.config.timeout_seconds.map(Duration::from_secs)
    }

    pub fn credential_backend(&self) -> CredentialBackend {
        self.config.credential_backend
    }

    /// Update one key from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key {
            "url" => {
                validate_url(value)?;
                self.config.set_url(value.trim_end_matches('/').to_string());
            }
            "timeout_seconds" => {
                let seconds = value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    field: key.to_string(),
                    value: value.to_string(),
                    reason: "expected a whole number of seconds".to_string(),
                })?;
                self.config.timeout_seconds = (seconds > 0).then_some(seconds);
            }
            "credential_backend" => {
                self.config.credential_backend =
                    value
                        .parse::<CredentialBackend>()
                        .map_err(|reason| ConfigError::InvalidValue {
                            field: key.to_string(),
                            value: value.to_string(),
                            reason,
                        })?;
            }
            other => {
                return Err(CliError::InvalidArguments(format!(
                    "Unknown config key '{}', expected one of: {}",
                    other,
                    SETTABLE_KEYS.join(", ")
                ))
                .into());
            }
        }
        Ok(())
    }

    pub fn save_config(&self, path: Option<PathBuf>) -> Result<(), AppError> {
        self.config.save(path).map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_url() {
        let mut service = ConfigService::new(Config::default());
        service.set("url", "http://localhost:8000/").unwrap();
        assert_eq!(service.get_url(), Some("http://localhost:8000".to_string()));
    }

    #[test]
    fn test_set_rejects_bad_url() {
        let mut service = ConfigService::new(Config::default());
        assert!(service.set("url", "localhost:8000").is_err());
        assert!(service.config().url.is_none());
    }

    #[test]
    fn test_set_timeout() {
        let mut service = ConfigService::new(Config::default());
        service.set("timeout_seconds", "20").unwrap();
        assert_eq!(service.timeout(), Some(Duration::from_secs(20)));

        service.set("timeout_seconds", "0").unwrap();
        assert_eq!(service.timeout(), None);

        assert!(matches!(
            service.set("timeout_seconds", "soon"),
            Err(AppError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_set_backend() {
        let mut service = ConfigService::new(Config::default());
        service.set("credential_backend", "file").unwrap();
        assert_eq!(service.credential_backend(), CredentialBackend::File);
        assert!(service.set("credential_backend", "vault").is_err());
    }

    #[test]
    fn test_set_unknown_key() {
        let mut service = ConfigService::new(Config::default());
        assert!(matches!(
            service.set("color", "blue"),
            Err(AppError::Cli(CliError::InvalidArguments(_)))
        ));
    }

    #[test]
    fn test_save_config_round_trip() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.toml");

        let mut service = ConfigService::new(Config::default());
        service.set("url", "https://api.example.test").unwrap();
        service.save_config(Some(path.clone())).unwrap();

        let loaded = Config::load(Some(path)).unwrap();
        assert_eq!(loaded.url.as_deref(), Some("https://api.example.test"));
    }
}
