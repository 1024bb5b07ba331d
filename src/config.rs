//! Engine configuration.
//!
//! One [`EngineConfig`] value is constructed at startup and passed by
//! reference into the script boundary; nothing in the engine mutates it
//! afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default bound on redirect hops per `get`.
const DEFAULT_REDIRECT_LOOP_LIMIT: u32 = 70;

fn default_redirect_loop_limit() -> u32 {
    DEFAULT_REDIRECT_LOOP_LIMIT
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Engine-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum redirect hops a single `get` will follow (default 70).
    #[serde(default = "default_redirect_loop_limit")]
    pub redirect_loop_limit: u32,

    /// Emit diagnostic lines on stderr (default false).
    #[serde(default)]
    pub debug: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            redirect_loop_limit: DEFAULT_REDIRECT_LOOP_LIMIT,
            debug: false,
        }
    }
}

impl EngineConfig {
    /// Configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the redirect hop limit.
    pub fn with_redirect_loop_limit(mut self, limit: u32) -> Self {
        self.redirect_loop_limit = limit;
        self
    }

    /// Enable or disable the stderr diagnostics channel.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Load and validate configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// The hop limit must allow at least one redirect.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.redirect_loop_limit == 0 {
            return Err(ConfigError::Invalid(
                "redirect_loop_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
