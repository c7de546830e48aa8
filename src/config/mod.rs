//! Configuration management for gluesync

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::client::executor::DEFAULT_MAX_ATTEMPTS;
use crate::client::rate_limit::DEFAULT_REQUESTS_PER_SECOND;
use crate::error::{ConfigError, Result};
use crate::sync::filter::DEFAULT_WORKERS;

/// Default IT Glue API host (EU region)
pub const DEFAULT_DIRECTORY_URL: &str = "https://api.eu.itglue.com";

/// Default Autotask REST zone
pub const DEFAULT_TICKETING_URL: &str = "https://webservices15.autotask.net/atservicesrest/v1.0";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// IT Glue connection settings
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Autotask connection settings
    #[serde(default)]
    pub ticketing: TicketingConfig,

    /// Throughput and retry tuning
    #[serde(default)]
    pub limits: Limits,
}

/// IT Glue connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// IT Glue API key (sent as `x-api-key`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_directory_url")]
    pub base_url: String,
}

/// Autotask connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketingConfig {
    /// API user name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// API user secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Tracking identifier of the API integration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_code: Option<String>,

    /// REST zone base URL
    #[serde(default = "default_ticketing_url")]
    pub base_url: String,
}

/// Request pacing, fan-out and retry tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    /// Upstream ceiling for IT Glue contact detail requests
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Concurrent contact detail fetches per organization
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Attempts per HTTP request before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First backoff delay; doubles on every further attempt
    #[serde(default = "default_backoff_base_secs")]
    pub backoff_base_secs: u64,
}

fn default_directory_url() -> String {
    DEFAULT_DIRECTORY_URL.to_string()
}

fn default_ticketing_url() -> String {
    DEFAULT_TICKETING_URL.to_string()
}

fn default_requests_per_second() -> u32 {
    DEFAULT_REQUESTS_PER_SECOND
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_backoff_base_secs() -> u64 {
    1
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_directory_url(),
        }
    }
}

impl Default for TicketingConfig {
    fn default() -> Self {
        Self {
            username: None,
            secret: None,
            integration_code: None,
            base_url: default_ticketing_url(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            workers: default_workers(),
            max_retries: default_max_retries(),
            backoff_base_secs: default_backoff_base_secs(),
        }
    }
}

impl Limits {
    /// Base delay for the exponential backoff schedule
    pub fn backoff_base(&self) -> Duration {
        Duration::from_secs(self.backoff_base_secs)
    }
}

/// Validated Autotask credentials
#[derive(Debug, Clone)]
pub struct TicketingCredentials {
    pub username: String,
    pub secret: String,
    pub integration_code: String,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".gluesync").join("config.yaml"))
    }

    /// Resolve an optional override into a concrete path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional override path.
    ///
    /// A missing file yields defaults so that credentials can come entirely
    /// from flags or environment variables.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match Self::load_from(Self::resolve_path(path)?) {
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional override path
    pub fn save_at(&self, path: Option<&str>) -> Result<PathBuf> {
        let path = Self::resolve_path(path)?;
        self.save_to(path.clone())?;
        Ok(path)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Credentials live in this file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// The IT Glue API key, or an error if it is not configured
    pub fn require_api_key(&self) -> Result<&str> {
        self.directory
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingDirectoryKey.into())
    }

    /// All three Autotask credentials, or an error naming the first gap
    pub fn require_ticketing(&self) -> Result<TicketingCredentials> {
        fn field(value: &Option<String>, name: &str) -> Result<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| ConfigError::MissingTicketingCredentials(name.to_string()).into())
        }

        let t = &self.ticketing;
        Ok(TicketingCredentials {
            username: field(&t.username, "username")?,
            secret: field(&t.secret, "secret")?,
            integration_code: field(&t.integration_code, "integration code")?,
        })
    }

    /// Reject tuning values that would stall the run
    pub fn validate_limits(&self) -> Result<()> {
        if self.limits.requests_per_second == 0 {
            return Err(ConfigError::Invalid("requests_per_second must be > 0".to_string()).into());
        }
        if self.limits.workers == 0 {
            return Err(ConfigError::Invalid("workers must be > 0".to_string()).into());
        }
        if self.limits.max_retries == 0 {
            return Err(ConfigError::Invalid("max_retries must be > 0".to_string()).into());
        }
        Ok(())
    }
}
