//! Keystroke Emission
//!
//! The registry never injects keystrokes itself. It hands every resolved
//! press and release to a [`KeystrokeEmitter`], which may inject directly,
//! forward to a dispatch queue (see [`crate::input::dispatch`]), or just log.
//!
//! Emitters are called from whichever thread delivered the hardware event,
//! possibly several at once, and are never called while a registry lock is
//! held.

use std::sync::Arc;
use tracing::info;

use crate::input::keystroke::Keystroke;

/// A single press or release of a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeystrokeEvent {
    /// Keystroke to inject
    pub keystroke: Keystroke,
    /// Press (true) or release (false)
    pub pressed: bool,
}

impl KeystrokeEvent {
    /// Press event
    pub fn press(keystroke: Keystroke) -> Self {
        Self {
            keystroke,
            pressed: true,
        }
    }

    /// Release event
    pub fn release(keystroke: Keystroke) -> Self {
        Self {
            keystroke,
            pressed: false,
        }
    }
}

/// Sink for resolved keystrokes
#[cfg_attr(test, mockall::automock)]
pub trait KeystrokeEmitter: Send + Sync {
    /// Inject a press (`pressed == true`) or release of `keystroke`
    ///
    /// Must return quickly and must tolerate concurrent calls.
    fn issue_keystroke(&self, keystroke: Keystroke, pressed: bool);
}

impl<E: KeystrokeEmitter + ?Sized> KeystrokeEmitter for Arc<E> {
    fn issue_keystroke(&self, keystroke: Keystroke, pressed: bool) {
        (**self).issue_keystroke(keystroke, pressed);
    }
}

/// Emitter backed by a closure
pub struct FnEmitter<F>(F);

impl<F> FnEmitter<F>
where
    F: Fn(Keystroke, bool) + Send + Sync,
{
    /// Wrap a closure
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> KeystrokeEmitter for FnEmitter<F>
where
    F: Fn(Keystroke, bool) + Send + Sync,
{
    fn issue_keystroke(&self, keystroke: Keystroke, pressed: bool) {
        (self.0)(keystroke, pressed);
    }
}

/// Emitter that only logs, for dry runs without an injector attached
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEmitter;

impl KeystrokeEmitter for TracingEmitter {
    fn issue_keystroke(&self, keystroke: Keystroke, pressed: bool) {
        info!(
            target: "keystroke",
            keystroke = %keystroke,
            pressed,
            "{} {}",
            if pressed { "press" } else { "release" },
            keystroke
        );
    }
}
