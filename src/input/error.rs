//! Engine Error Types
//!
//! Keystroke resolution itself cannot fail. Errors come from the layers
//! around it: the dispatch queue, event script decoding and template files.

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Engine error types
#[derive(Error, Debug)]
pub enum EngineError {
    /// Bounded dispatch queue is full
    #[error("Keystroke queue is full (capacity {0})")]
    QueueFull(usize),

    /// Dispatch worker is gone
    #[error("Keystroke queue is disconnected")]
    QueueDisconnected,

    /// Dispatch worker could not be started
    #[error("Failed to spawn keystroke dispatch thread: {0}")]
    DispatchSpawnFailed(#[source] std::io::Error),

    /// Dispatch worker panicked
    #[error("Keystroke dispatch thread panicked")]
    DispatchPanicked,

    /// Malformed line in an event script
    #[error("Invalid event at line {line}: {reason}")]
    InvalidEvent {
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// Template could not be decoded
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error classification for log routing and user hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Dispatch queue errors
    Dispatch,
    /// Event script errors
    Event,
    /// Template errors
    Template,
    /// IO errors
    Io,
}

/// Classify error
pub fn classify_error(error: &EngineError) -> ErrorType {
    match error {
        EngineError::QueueFull(_)
        | EngineError::QueueDisconnected
        | EngineError::DispatchSpawnFailed(_)
        | EngineError::DispatchPanicked => ErrorType::Dispatch,

        EngineError::InvalidEvent { .. } => ErrorType::Event,

        EngineError::InvalidTemplate(_) => ErrorType::Template,

        EngineError::Io(_) => ErrorType::Io,
    }
}

/// True if the error only affects a single keystroke and the engine can keep going
pub fn is_transient(error: &EngineError) -> bool {
    matches!(error, EngineError::QueueFull(_))
}
