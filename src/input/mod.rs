//! Control Surface Input Handling
//!
//! Maps button and encoder events from a control surface to host keystrokes.
//!
//! # Architecture
//!
//! ```text
//! Device events (issue_button / issue_encoder)
//!       ↓
//! ┌─────────────────────────┐
//! │  Actions (registry)     │ ← load_template swaps the tables
//! │  - mapping tables       │
//! │  - held buttons         │
//! └─────────────────────────┘
//!       ↓ Action::desired_keystroke(held buttons)
//! ┌─────────────────────────┐
//! │  KeystrokeEmitter       │ ← inline, or via KeystrokeDispatcher
//! └─────────────────────────┘
//!       ↓
//! Host keystroke injection
//! ```
//!
//! # Usage Example
//!
//! ```rust
//! use keystroke_engine::input::{
//!     keycodes, Actions, ActionsTemplate, EncoderDirection, Keystroke, TracingEmitter,
//! };
//!
//! let actions = Actions::new(TracingEmitter);
//!
//! let mut template = ActionsTemplate::new();
//! let play = template.button_mut(5);
//! play.set_keystroke(Keystroke::key(keycodes::KEY_A));
//! play.set_modified_keystroke(2, Keystroke::key(keycodes::KEY_B));
//! template
//!     .encoder_mut(0, EncoderDirection::Clockwise)
//!     .set_keystroke(Keystroke::key(keycodes::KEY_VOLUMEUP));
//! actions.load_template(template);
//!
//! actions.issue_button(2, true);
//! assert_eq!(actions.button_keystroke(5), Keystroke::key(keycodes::KEY_B));
//! actions.issue_encoder(0, 3);
//! ```

pub mod action;
pub mod actions;
pub mod dispatch;
pub mod emitter;
pub mod error;
pub mod keystroke;
pub mod stats;
pub mod template;

pub use action::{Action, ModifierId};
pub use actions::Actions;
pub use dispatch::KeystrokeDispatcher;
pub use emitter::{FnEmitter, KeystrokeEmitter, KeystrokeEvent, TracingEmitter};
pub use error::{classify_error, EngineError, ErrorType, Result};
pub use keystroke::{keycodes, KeyModifiers, Keystroke};
pub use stats::EngineStats;
pub use template::{ActionsTemplate, ButtonId, EncoderActions, EncoderDirection, EncoderId};
