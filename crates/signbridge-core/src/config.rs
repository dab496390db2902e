//! Bridge configuration: backend location and HTTP client settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TRANSLATE_PATH: &str = "/translate/";
pub const CONFIG_FILE_NAME: &str = "signbridge.json";

pub const ENV_CONFIG_DIR: &str = "SIGNBRIDGE_CONFIG_DIR";
pub const ENV_BACKEND_URL: &str = "SIGNBRIDGE_BACKEND_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "SIGNBRIDGE_REQUEST_TIMEOUT_SECS";

/// Persisted bridge configuration (`signbridge.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_translate_path")]
    pub translate_path: String,
    /// Client timeout for backend calls. `None` leaves the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// Path to config file (not serialized).
    #[serde(skip)]
    pub config_path: PathBuf,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.into()
}
fn default_translate_path() -> String {
    DEFAULT_TRANSLATE_PATH.into()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            translate_path: DEFAULT_TRANSLATE_PATH.into(),
            request_timeout_secs: None,
            config_path: PathBuf::new(),
        }
    }
}

impl BridgeConfig {
    /// Resolve the config directory from `SIGNBRIDGE_CONFIG_DIR`, else the working directory.
    pub fn resolve_config_dir() -> PathBuf {
        std::env::var(ENV_CONFIG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Load config from `<config_dir>/signbridge.json`, then apply environment overrides.
    pub fn load(config_dir: &Path) -> Self {
        let mut config = Self::load_file(config_dir);
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Load config from file only, falling back to defaults.
    pub fn load_file(config_dir: &Path) -> Self {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let mut config: BridgeConfig = match std::fs::read_to_string(&config_path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                warn!("Ignoring unparsable {}: {}", config_path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        config.config_path = config_path;
        config
    }

    /// Apply overrides from an environment lookup. Unparsable values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|u| !u.trim().is_empty()) {
            self.backend_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(0) => self.request_timeout_secs = None,
                Ok(secs) => self.request_timeout_secs = Some(secs),
                Err(_) => warn!("Ignoring invalid {}={}", ENV_REQUEST_TIMEOUT, raw),
            }
        }
    }

    /// Save config to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        if self.config_path.as_os_str().is_empty() {
            return Err(Error::Config(
                "No config path set; load the config from a directory first".into(),
            ));
        }
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&self.config_path, json)?;
        info!("Saved bridge config to {}", self.config_path.display());
        Ok(())
    }

    /// Set one field by its file key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "backend_url" => {
                if value.is_empty() {
                    return Err(Error::Config("backend_url must not be empty".into()));
                }
                self.backend_url = value.to_string();
            }
            "translate_path" => self.translate_path = value.to_string(),
            "request_timeout_secs" => {
                self.request_timeout_secs = match value.parse::<u64>() {
                    Ok(0) => None,
                    Ok(secs) => Some(secs),
                    Err(_) => {
                        return Err(Error::Config(format!(
                            "request_timeout_secs must be a whole number of seconds, got '{}'",
                            value
                        )))
                    }
                };
            }
            other => return Err(Error::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    /// Full URL of the translation endpoint.
    pub fn translate_endpoint(&self) -> String {
        join_url(&self.backend_url, &self.translate_path)
    }

    /// URL of the backend liveness route.
    pub fn health_endpoint(&self) -> String {
        join_url(&self.backend_url, "/")
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
