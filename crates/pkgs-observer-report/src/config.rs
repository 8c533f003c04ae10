//! Agent configuration with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Built-in defaults
//! 2. YAML config file (`--config`, `PKGS_OBSERVER_CONFIG`, or /etc/pkgs-observer/agent.yaml)
//! 3. Environment variables (`INGEST_ENDPOINT`, `PKGS_OBSERVER_*`)
//! 4. CLI flags (handled by caller)

use std::env;
use std::fs;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Config file read when no path is given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/pkgs-observer/agent.yaml";

/// Application id the machine id is protected with
pub const DEFAULT_APP_ID: &str = "pkgs.observer";

/// Agent configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AgentConfig {
    /// URL the report is posted to
    #[serde(default)]
    pub endpoint: Option<String>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Package manager timeout in seconds; unset or 0 waits indefinitely
    #[serde(default)]
    pub command_timeout_secs: Option<u64>,

    /// Include the protected machine id in reports
    #[serde(default = "default_send_machine_id")]
    pub send_machine_id: bool,

    /// Application id used to protect the machine id
    #[serde(default = "default_app_id")]
    pub app_id: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            http_timeout_secs: default_http_timeout(),
            command_timeout_secs: None,
            send_machine_id: default_send_machine_id(),
            app_id: default_app_id(),
        }
    }
}

fn default_http_timeout() -> u64 {
    30
}

fn default_send_machine_id() -> bool {
    true
}

fn default_app_id() -> String {
    DEFAULT_APP_ID.to_string()
}

impl AgentConfig {
    /// The configured endpoint
    pub fn endpoint(&self) -> Result<&str> {
        match self.endpoint.as_deref() {
            Some(endpoint) if !endpoint.trim().is_empty() => Ok(endpoint),
            _ => Err(Error::MissingEndpoint),
        }
    }

    /// HTTP request timeout
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Package manager timeout
    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Reject values no run could succeed with
    pub fn validate(&self) -> Result<()> {
        if self.http_timeout_secs == 0 {
            return Err(Error::invalid_config("http-timeout-secs must be greater than 0"));
        }
        Ok(())
    }
}

/// Configuration loader
pub struct ConfigLoader {
    /// Config file location
    path: Utf8PathBuf,

    /// Whether the file was asked for and must exist
    required: bool,
}

impl ConfigLoader {
    /// Loader for `PKGS_OBSERVER_CONFIG`, falling back to the default path
    pub fn new() -> Self {
        match env::var("PKGS_OBSERVER_CONFIG") {
            Ok(path) if !path.is_empty() => Self::with_path(path),
            _ => Self {
                path: Utf8PathBuf::from(DEFAULT_CONFIG_PATH),
                required: false,
            },
        }
    }

    /// Loader for an explicit config file, which must exist
    pub fn with_path(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    /// Get the config file path
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Load configuration with precedence
    pub fn load(&self) -> Result<AgentConfig> {
        let mut config = if self.path.exists() {
            debug!("Loading config from {}", self.path);
            self.load_yaml_file(&self.path)?
        } else if self.required {
            return Err(Error::config_not_found(self.path.as_str()));
        } else {
            AgentConfig::default()
        };

        config = Self::apply_env_overrides(config)?;
        config.validate()?;

        Ok(config)
    }

    fn load_yaml_file(&self, path: &Utf8Path) -> Result<AgentConfig> {
        let content = fs::read_to_string(path)?;
        let config: AgentConfig = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: AgentConfig) -> Result<AgentConfig> {
        if let Ok(val) = env::var("INGEST_ENDPOINT") {
            if !val.is_empty() {
                config.endpoint = Some(val);
            }
        }

        if let Ok(val) = env::var("PKGS_OBSERVER_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("PKGS_OBSERVER_HTTP_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("PKGS_OBSERVER_COMMAND_TIMEOUT_SECS") {
            config.command_timeout_secs = Some(val.parse().map_err(|_| {
                Error::invalid_config("PKGS_OBSERVER_COMMAND_TIMEOUT_SECS must be a valid number")
            })?);
        }

        if let Ok(val) = env::var("PKGS_OBSERVER_SEND_MACHINE_ID") {
            config.send_machine_id = val.parse().map_err(|_| {
                Error::invalid_config("PKGS_OBSERVER_SEND_MACHINE_ID must be true or false")
            })?;
        }

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
