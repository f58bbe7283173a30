//! Action Resolution
//!
//! An [`Action`] is the mapping for one logical input (a button, or one
//! rotation direction of an encoder): a base keystroke plus overrides that
//! apply while a given modifier button is held.
//!
//! # Override priority
//!
//! When several held buttons each have an override registered, the lowest
//! button id wins. [`Action::desired_keystroke`] walks the pressed set in
//! ascending order. Callers that need another policy can hand an explicitly
//! ordered sequence to [`Action::resolve`].

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::input::keystroke::Keystroke;
use crate::input::template::id_keys;

/// Button id used as a modifier
pub type ModifierId = u8;

/// Keystroke mapping for one logical input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    /// Keystroke used when no override applies
    keystroke: Keystroke,

    /// Overrides keyed by modifier button id. Never holds `Keystroke::NONE`.
    #[serde(
        serialize_with = "id_keys::serialize",
        deserialize_with = "deserialize_overrides",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    modifiers: BTreeMap<ModifierId, Keystroke>,
}

/// Overrides read from a template go through the same rule as
/// `set_modified_keystroke`: a `NONE` value means "no override".
fn deserialize_overrides<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<ModifierId, Keystroke>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut overrides: BTreeMap<ModifierId, Keystroke> = id_keys::deserialize(deserializer)?;
    overrides.retain(|_, keystroke| !keystroke.is_none());
    Ok(overrides)
}

impl Action {
    /// Create an empty action (base `NONE`, no overrides)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an action with a base keystroke
    pub fn with_keystroke(keystroke: Keystroke) -> Self {
        Self {
            keystroke,
            modifiers: BTreeMap::new(),
        }
    }

    /// Set the base keystroke
    pub fn set_keystroke(&mut self, keystroke: Keystroke) {
        self.keystroke = keystroke;
    }

    /// Set or clear the override for `modifier`
    ///
    /// Passing `Keystroke::NONE` removes the override.
    pub fn set_modified_keystroke(&mut self, modifier: ModifierId, keystroke: Keystroke) {
        if keystroke.is_none() {
            self.modifiers.remove(&modifier);
        } else {
            self.modifiers.insert(modifier, keystroke);
        }
    }

    /// Base keystroke
    pub fn keystroke(&self) -> Keystroke {
        self.keystroke
    }

    /// Override for `modifier`, or `NONE`
    pub fn modified_keystroke(&self, modifier: ModifierId) -> Keystroke {
        self.modifiers
            .get(&modifier)
            .copied()
            .unwrap_or(Keystroke::NONE)
    }

    /// All registered overrides
    pub fn modified_keystrokes(&self) -> &BTreeMap<ModifierId, Keystroke> {
        &self.modifiers
    }

    /// True if neither a base keystroke nor any override is set
    pub fn is_empty(&self) -> bool {
        self.keystroke.is_none() && self.modifiers.is_empty()
    }

    /// Keystroke for the given set of held buttons
    pub fn desired_keystroke(&self, active_modifiers: &BTreeSet<ModifierId>) -> Keystroke {
        self.resolve(active_modifiers.iter().copied())
    }

    /// Keystroke for held buttons visited in caller-defined priority order
    ///
    /// The first id with a registered override wins; otherwise the base
    /// keystroke is returned.
    pub fn resolve<I>(&self, active_modifiers: I) -> Keystroke
    where
        I: IntoIterator<Item = ModifierId>,
    {
        if self.modifiers.is_empty() {
            return self.keystroke;
        }

        active_modifiers
            .into_iter()
            .find_map(|modifier| self.modifiers.get(&modifier).copied())
            .unwrap_or(self.keystroke)
    }
}
