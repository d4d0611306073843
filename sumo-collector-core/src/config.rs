//! Configuration loading and management
//!
//! Configuration is handed to the client explicitly, either built in code or
//! loaded from a TOML file:
//!
//! ```toml
//! [client]
//! name = "web-01"
//! access_id = "suXXXXXXXXXXXX"
//! access_key = "XXXXXXXXXXXXXXXXXXXXXXXXXXXX"
//! region = "us2"
//! request_timeout_secs = 60
//!
//! [logging]
//! level = "debug"
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Collector API client configuration
    #[serde(default)]
    pub client: ClientConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sumo Logic API client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Collector name to resolve (usually the node name)
    #[serde(default)]
    pub name: String,

    /// Access ID, sent as the basic auth user
    #[serde(default)]
    pub access_id: String,

    /// Access key, sent as the basic auth password
    #[serde(default)]
    pub access_key: String,

    /// Deployment region, e.g. `us2` for `api.us2.sumologic.com`
    #[serde(default = "default_region")]
    pub region: String,

    /// Full API base URL; overrides `region` when set
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Overall per-request deadline in seconds; unset or 0 means 60
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Transport connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Backoff growth between connect-timeout retries, in seconds
    #[serde(default = "default_backoff_step")]
    pub backoff_step_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            access_id: String::new(),
            access_key: String::new(),
            region: default_region(),
            endpoint: None,
            request_timeout_secs: None,
            connect_timeout_secs: default_connect_timeout(),
            backoff_step_secs: default_backoff_step(),
        }
    }
}

impl ClientConfig {
    /// Build a config for the given collector name and credentials
    pub fn new(
        name: impl Into<String>,
        access_id: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            access_id: access_id.into(),
            access_key: access_key.into(),
            ..Default::default()
        }
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("client.name is required".to_string()));
        }
        if self.access_id.is_empty() {
            return Err(Error::Config("client.access_id is required".to_string()));
        }
        if self.access_key.is_empty() {
            return Err(Error::Config("client.access_key is required".to_string()));
        }
        if self.connect_timeout_secs == 0 {
            return Err(Error::Config(
                "client.connect_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.endpoint.is_none() && self.region.trim().is_empty() {
            return Err(Error::Config(
                "client.region is required when no endpoint is set".to_string(),
            ));
        }
        Ok(())
    }

    /// API base URL without a trailing slash
    pub fn api_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://api.{}.sumologic.com/api/v1", self.region),
        }
    }

    /// Overall deadline applied to every request
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_secs {
            Some(secs) if secs > 0 => Duration::from_secs(secs),
            _ => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn backoff_step(&self) -> Duration {
        Duration::from_secs(self.backoff_step_secs)
    }
}

/// Deadline used when `request_timeout_secs` is unset or zero
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

fn default_region() -> String {
    "us2".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_backoff_step() -> u64 {
    10
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for rotated log files; stderr when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }
}
