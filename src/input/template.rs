//! Action Templates
//!
//! A template is the complete set of button and encoder mappings loaded into
//! the registry in one step. Templates are built by external tooling (the
//! mapping editor, a saved profile) and handed over by value.
//!
//! Templates serialize with serde. Map keys are written as strings so the
//! same shape works for TOML and JSON:
//!
//! ```toml
//! [button_actions.5]
//! keystroke = { keycode = 30 }
//! modifiers = { "2" = { keycode = 48 } }
//!
//! [encoder_actions.0.clockwise]
//! keystroke = { keycode = 115 }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::input::action::Action;

/// Button id as reported by the device
pub type ButtonId = u8;

/// Encoder id as reported by the device
pub type EncoderId = u8;

/// Encoder rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderDirection {
    /// Positive detent count
    Clockwise,
    /// Zero or negative detent count
    CounterClockwise,
}

impl EncoderDirection {
    /// Direction for a signed detent count
    pub fn from_count(count: i8) -> Self {
        if count > 0 {
            Self::Clockwise
        } else {
            Self::CounterClockwise
        }
    }
}

impl fmt::Display for EncoderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clockwise => f.write_str("cw"),
            Self::CounterClockwise => f.write_str("ccw"),
        }
    }
}

/// Actions for both rotation directions of one encoder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderActions {
    /// Action for clockwise detents
    pub clockwise: Action,
    /// Action for counter-clockwise detents
    pub counter_clockwise: Action,
}

impl EncoderActions {
    /// Action for `direction`
    pub fn get(&self, direction: EncoderDirection) -> &Action {
        match direction {
            EncoderDirection::Clockwise => &self.clockwise,
            EncoderDirection::CounterClockwise => &self.counter_clockwise,
        }
    }

    /// Mutable action for `direction`
    pub fn get_mut(&mut self, direction: EncoderDirection) -> &mut Action {
        match direction {
            EncoderDirection::Clockwise => &mut self.clockwise,
            EncoderDirection::CounterClockwise => &mut self.counter_clockwise,
        }
    }
}

/// Complete button and encoder mapping bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionsTemplate {
    /// Button id → action
    #[serde(with = "id_keys")]
    pub button_actions: BTreeMap<ButtonId, Action>,

    /// Encoder id → per-direction actions
    #[serde(with = "id_keys")]
    pub encoder_actions: BTreeMap<EncoderId, EncoderActions>,
}

impl ActionsTemplate {
    /// Create an empty template
    pub fn new() -> Self {
        Self::default()
    }

    /// Action for `button`, created empty if missing
    pub fn button_mut(&mut self, button: ButtonId) -> &mut Action {
        self.button_actions.entry(button).or_default()
    }

    /// Action for `encoder` in `direction`, created empty if missing
    pub fn encoder_mut(&mut self, encoder: EncoderId, direction: EncoderDirection) -> &mut Action {
        self.encoder_actions
            .entry(encoder)
            .or_default()
            .get_mut(direction)
    }

    /// Action registered for `button`
    pub fn button(&self, button: ButtonId) -> Option<&Action> {
        self.button_actions.get(&button)
    }

    /// Action registered for `encoder` in `direction`
    pub fn encoder(&self, encoder: EncoderId, direction: EncoderDirection) -> Option<&Action> {
        self.encoder_actions
            .get(&encoder)
            .map(|actions| actions.get(direction))
    }
}

/// Serde adapter writing small integer map keys as strings
///
/// TOML only allows string keys.
pub(crate) mod id_keys {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub(crate) fn serialize<S, V>(map: &BTreeMap<u8, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        serializer.collect_map(map.iter().map(|(id, value)| (id.to_string(), value)))
    }

    pub(crate) fn deserialize<'de, D, V>(deserializer: D) -> Result<BTreeMap<u8, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        BTreeMap::<String, V>::deserialize(deserializer)?
            .into_iter()
            .map(|(key, value)| {
                key.trim()
                    .parse::<u8>()
                    .map(|id| (id, value))
                    .map_err(|_| D::Error::custom(format!("invalid id `{}`, expected 0-255", key)))
            })
            .collect()
    }
}
