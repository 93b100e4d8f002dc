//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/todo/config.toml)
//! 3. Environment variables (TODO_* prefix)
//!
//! Environment variables take precedence over config file values.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable prefix
const ENV_PREFIX: &str = "TODO";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Base URL of the todo service, used by clients
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Address the todo service binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory for the SQLite database
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Per-request timeout for clients; unset means wait indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            listen_addr: default_listen_addr(),
            data_dir: default_data_dir(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (TODO_API_URL, TODO_LISTEN_ADDR, TODO_DATA_DIR,
    ///    TODO_REQUEST_TIMEOUT_SECS)
    /// 2. Config file (~/.config/todo/config.toml or TODO_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var(format!("{}_API_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.api_url = val;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_LISTEN_ADDR", ENV_PREFIX)) {
            if !val.is_empty() {
                self.listen_addr = val;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_REQUEST_TIMEOUT_SECS", ENV_PREFIX)) {
            self.request_timeout_secs = if val.is_empty() {
                None
            } else {
                Some(val.parse().with_context(|| {
                    format!("Invalid {}_REQUEST_TIMEOUT_SECS: {:?}", ENV_PREFIX, val)
                })?)
            };
        }

        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with TODO_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("todo")
            .join("config.toml")
    }

    /// Get the path to the SQLite database
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("todos.db")
    }

    /// Base URL without trailing slashes
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Client request timeout, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn default_api_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("todo")
}
