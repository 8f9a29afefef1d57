//! Validator configuration
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. JSON config file (`--config`)
//! 3. environment: `DB_URL`, `DB_USER`, `DB_PASS`

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Query engine base URL (default "http://localhost:8529")
    #[serde(default = "default_db_url")]
    pub db_url: String,

    /// Query engine user (default "root")
    #[serde(default = "default_db_user")]
    pub db_user: String,

    /// Query engine password (default empty)
    #[serde(default)]
    pub db_pass: String,

    /// Seconds to wait for the engine before giving up (default 60)
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// Seconds between readiness probes (default 3)
    #[serde(default = "default_wait_interval_secs")]
    pub wait_interval_secs: u64,

    /// Per-request timeout; transport default when absent
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Log level when RUST_LOG is unset (default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_db_url() -> String {
    "http://localhost:8529".to_string()
}
fn default_db_user() -> String {
    "root".to_string()
}
fn default_wait_timeout_secs() -> u64 {
    60
}
fn default_wait_interval_secs() -> u64 {
    3
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_url: default_db_url(),
            db_user: default_db_user(),
            db_pass: String::new(),
            wait_timeout_secs: default_wait_timeout_secs(),
            wait_interval_secs: default_wait_interval_secs(),
            request_timeout_secs: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Resolve configuration from defaults, optional file and process environment.
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `DB_URL`, `DB_USER` and `DB_PASS` overrides from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DB_URL") {
            self.db_url = url;
        }
        if let Some(user) = lookup("DB_USER") {
            self.db_user = user;
        }
        if let Some(pass) = lookup("DB_PASS") {
            self.db_pass = pass;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.db_url.trim().is_empty() {
            return Err(CliError::config_error("db_url must not be empty"));
        }

        if !(self.db_url.starts_with("http://") || self.db_url.starts_with("https://")) {
            return Err(CliError::config_error(format!(
                "Invalid db_url: '{}'. Must start with http:// or https://",
                self.db_url
            )));
        }

        if self.wait_timeout_secs == 0 {
            return Err(CliError::config_error("wait_timeout_secs must be > 0"));
        }

        if self.wait_interval_secs == 0 {
            return Err(CliError::config_error("wait_interval_secs must be > 0"));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(CliError::config_error("request_timeout_secs must be > 0"));
        }

        Ok(())
    }

    /// Readiness wait timeout
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    /// Delay between readiness probes
    pub fn wait_interval(&self) -> Duration {
        Duration::from_secs(self.wait_interval_secs)
    }

    /// Per-request timeout, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
