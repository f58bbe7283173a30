//! # keystroke-engine
//!
//! Action-resolution core for a control surface (buttons and rotary
//! encoders) that drives host keystrokes.
//!
//! # Architecture
//!
//! ```text
//! keystroke-engine
//!   ├─> input::Actions        (registry, held buttons, event dispatch)
//!   ├─> input::Action         (base keystroke + modifier overrides)
//!   ├─> input::KeystrokeEmitter / KeystrokeDispatcher (injection seam)
//!   ├─> config                (TOML configuration)
//!   └─> replay                (event script dry runs)
//! ```
//!
//! # Data Flow
//!
//! **Event Path:** Device → `issue_button` / `issue_encoder` → Action
//! resolution → Emitter → Host
//!
//! **Reconfiguration Path:** Template editor → `load_template` → mapping tables

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Engine configuration
pub mod config;

/// Action resolution, registry and keystroke emission
pub mod input;

/// Event script replay
pub mod replay;

/// Utility functions
pub mod utils;
