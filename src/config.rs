//! Configuration management for Complichat
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::Cli;
use crate::error::{ComplichatError, Result};

/// Main configuration structure for Complichat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend service settings
    #[serde(default)]
    pub backend: BackendConfig,

    /// Interactive chat settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Backend service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the compliance-analysis service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    ///
    /// A request that exceeds this bound is treated as a failed request;
    /// nothing in the client waits on the network without a bound.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Interactive chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Placeholder text shown while a query is in flight
    #[serde(default = "default_thinking_notice")]
    pub thinking_notice: String,

    /// Show the welcome banner when entering interactive mode
    #[serde(default = "default_show_banner")]
    pub show_banner: bool,
}

fn default_thinking_notice() -> String {
    "Analyzing your query...".to_string()
}

fn default_show_banner() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            thinking_notice: default_thinking_notice(),
            show_banner: default_show_banner(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file with CLI overrides applied
    ///
    /// A missing file is not an error; defaults are used so the client
    /// works out of the box against a local backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| ComplichatError::Config(format!("Failed to read {}: {}", path, e)))?;
            let config: Config = serde_yaml::from_str(&contents)?;
            tracing::debug!("Loaded configuration from {}", path);
            config
        } else {
            tracing::debug!("No configuration file at {}, using defaults", path);
            Config::default()
        };

        if let Some(server) = &cli.server {
            tracing::debug!("Using backend override from CLI: {}", server);
            config.backend.base_url = server.clone();
        }

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error for an unparsable backend URL, a non-http(s)
    /// scheme, or a zero timeout.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.backend.base_url).map_err(|e| {
            ComplichatError::Config(format!(
                "Invalid backend base_url '{}': {}",
                self.backend.base_url, e
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ComplichatError::Config(format!(
                "Backend base_url must be http or https, got '{}'",
                url.scheme()
            ))
            .into());
        }

        if self.backend.timeout_seconds == 0 {
            return Err(
                ComplichatError::Config("backend.timeout_seconds must be non-zero".to_string())
                    .into(),
            );
        }

        if self.chat.thinking_notice.trim().is_empty() {
            return Err(
                ComplichatError::Config("chat.thinking_notice must not be empty".to_string())
                    .into(),
            );
        }

        Ok(())
    }
}
