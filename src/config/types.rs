//! Configuration section types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How resolved keystrokes reach the injector ("inline" or "queued")
    #[serde(default = "default_dispatch")]
    pub dispatch: String,

    /// Dispatch queue capacity when `dispatch = "queued"` (0 = unbounded)
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Template loaded at startup
    #[serde(default)]
    pub template: Option<PathBuf>,
}

fn default_dispatch() -> String {
    "inline".to_string()
}

fn default_queue_capacity() -> usize {
    256
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dispatch: default_dispatch(),
            queue_capacity: default_queue_capacity(),
            template: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files (None = console only)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: None,
        }
    }
}

/// Keystroke dispatch mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Call the injector on the event thread
    Inline,
    /// Hand keystrokes to a dispatch thread through a queue
    Queued {
        /// 0 = unbounded
        capacity: usize,
    },
}
