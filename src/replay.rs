//! Event Script Replay
//!
//! Drives an [`Actions`] registry from a plain-text event script, one device
//! event per line:
//!
//! ```text
//! # hold the shift button, tap play, turn the volume knob
//! button 2 press
//! button 5 press
//! button 5 release
//! button 2 release
//! encoder 0 3
//! encoder 0 -1
//! ```
//!
//! Blank lines and `#` comments are skipped. Used for dry runs of a template
//! without the device attached.

use std::io::BufRead;
use std::path::Path;
use tracing::debug;

use crate::input::error::{EngineError, Result};
use crate::input::{Actions, ActionsTemplate, ButtonId, EncoderId};

/// A raw device event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// Button pressed or released
    Button {
        /// Button id
        button: ButtonId,
        /// Pressed (true) or released (false)
        pressed: bool,
    },
    /// Encoder turned
    Encoder {
        /// Encoder id
        encoder: EncoderId,
        /// Signed detent count
        count: i8,
    },
}

impl DeviceEvent {
    /// Feed this event to the registry
    pub fn apply(&self, actions: &Actions) {
        match *self {
            DeviceEvent::Button { button, pressed } => actions.issue_button(button, pressed),
            DeviceEvent::Encoder { encoder, count } => actions.issue_encoder(encoder, count),
        }
    }
}

/// Parse one script line; `Ok(None)` for blank and comment lines
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<DeviceEvent>> {
    let content = line.split('#').next().unwrap_or("").trim();
    if content.is_empty() {
        return Ok(None);
    }

    let invalid = |reason: String| EngineError::InvalidEvent {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = content.split_whitespace().collect();
    match fields.as_slice() {
        ["button", id, state] => {
            let button = id
                .parse::<ButtonId>()
                .map_err(|_| invalid(format!("invalid button id `{}`", id)))?;
            let pressed = match *state {
                "press" | "down" => true,
                "release" | "up" => false,
                other => {
                    return Err(invalid(format!(
                        "expected press or release, got `{}`",
                        other
                    )))
                }
            };
            Ok(Some(DeviceEvent::Button { button, pressed }))
        }
        ["encoder", id, count] => {
            let encoder = id
                .parse::<EncoderId>()
                .map_err(|_| invalid(format!("invalid encoder id `{}`", id)))?;
            let count = count
                .parse::<i8>()
                .map_err(|_| invalid(format!("invalid detent count `{}`", count)))?;
            Ok(Some(DeviceEvent::Encoder { encoder, count }))
        }
        [command, ..] => Err(invalid(format!(
            "unknown or malformed command `{}`",
            command
        ))),
        [] => Ok(None),
    }
}

/// Replay every event from `reader`, returning the number of events applied
///
/// Stops at the first malformed line.
pub fn replay<R: BufRead>(reader: R, actions: &Actions) -> Result<usize> {
    let mut applied = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(event) = parse_line(index + 1, &line)? {
            event.apply(actions);
            applied += 1;
        }
    }

    debug!("Replayed {} events", applied);
    Ok(applied)
}

/// Read a TOML template from disk
pub fn load_template_file(path: &Path) -> Result<ActionsTemplate> {
    let content = std::fs::read_to_string(path)?;
    let template = toml::from_str(&content)?;
    Ok(template)
}
