//! Keystroke Value Type
//!
//! A keystroke is the host key (plus held modifier keys) that a control
//! surface input resolves to. `Keystroke::NONE` is the "do nothing" value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Linux evdev keycodes used by built-in templates and tests
pub mod keycodes {
    #![allow(missing_docs)]

    pub const KEY_RESERVED: u32 = 0;
    pub const KEY_ESC: u32 = 1;
    pub const KEY_1: u32 = 2;
    pub const KEY_2: u32 = 3;
    pub const KEY_TAB: u32 = 15;
    pub const KEY_Q: u32 = 16;
    pub const KEY_W: u32 = 17;
    pub const KEY_E: u32 = 18;
    pub const KEY_ENTER: u32 = 28;
    pub const KEY_A: u32 = 30;
    pub const KEY_S: u32 = 31;
    pub const KEY_D: u32 = 32;
    pub const KEY_Z: u32 = 44;
    pub const KEY_X: u32 = 45;
    pub const KEY_C: u32 = 46;
    pub const KEY_V: u32 = 47;
    pub const KEY_B: u32 = 48;
    pub const KEY_SPACE: u32 = 57;
    pub const KEY_F1: u32 = 59;
    pub const KEY_UP: u32 = 103;
    pub const KEY_LEFT: u32 = 105;
    pub const KEY_RIGHT: u32 = 106;
    pub const KEY_DOWN: u32 = 108;
    pub const KEY_MUTE: u32 = 113;
    pub const KEY_VOLUMEDOWN: u32 = 114;
    pub const KEY_VOLUMEUP: u32 = 115;
    pub const KEY_PLAYPAUSE: u32 = 164;
}

/// Host modifier keys held down for the duration of a keystroke
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyModifiers {
    /// Shift held
    pub shift: bool,
    /// Ctrl held
    pub ctrl: bool,
    /// Alt held
    pub alt: bool,
    /// Meta/Super/Windows held
    pub meta: bool,
}

impl KeyModifiers {
    /// No modifiers
    pub const EMPTY: KeyModifiers = KeyModifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// True if no modifier is held
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

/// A host keystroke to inject
///
/// Equality is structural: two keystrokes are the same if they press the
/// same keycode with the same modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keystroke {
    /// Linux evdev keycode
    pub keycode: u32,
    /// Modifiers held around the key
    #[serde(default, skip_serializing_if = "KeyModifiers::is_empty")]
    pub modifiers: KeyModifiers,
}

impl Keystroke {
    /// The "no action" keystroke
    pub const NONE: Keystroke = Keystroke {
        keycode: keycodes::KEY_RESERVED,
        modifiers: KeyModifiers::EMPTY,
    };

    /// Plain key without modifiers
    pub const fn key(keycode: u32) -> Self {
        Self {
            keycode,
            modifiers: KeyModifiers::EMPTY,
        }
    }

    /// Key with modifiers
    pub const fn with_modifiers(keycode: u32, modifiers: KeyModifiers) -> Self {
        Self { keycode, modifiers }
    }

    /// True for the `NONE` sentinel
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("NONE");
        }
        if self.modifiers.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt+")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift+")?;
        }
        if self.modifiers.meta {
            f.write_str("Meta+")?;
        }
        write!(f, "KEY({})", self.keycode)
    }
}
