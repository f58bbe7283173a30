//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod types;

pub use types::{DispatchMode, EngineConfig, LoggingConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Engine configuration
    #[serde(default)]
    pub engine: EngineConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate().context("Invalid config")?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Result<Self> {
        let config = Config::default();
        config.validate().context("Invalid config")?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        match self.engine.dispatch.as_str() {
            "inline" | "queued" => {}
            _ => anyhow::bail!("Invalid dispatch mode: {}", self.engine.dispatch),
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        if let Some(template) = &self.engine.template {
            if !template.exists() {
                anyhow::bail!("Template not found: {:?}", template);
            }
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(mut self, template: Option<PathBuf>, queued: bool) -> Self {
        if let Some(template) = template {
            self.engine.template = Some(template);
        }
        if queued {
            self.engine.dispatch = "queued".to_string();
        }

        self
    }

    /// Resolved dispatch mode
    pub fn dispatch_mode(&self) -> DispatchMode {
        match self.engine.dispatch.as_str() {
            "queued" => DispatchMode::Queued {
                capacity: self.engine.queue_capacity,
            },
            _ => DispatchMode::Inline,
        }
    }
}
