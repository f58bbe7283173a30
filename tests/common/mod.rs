//! Shared helpers for integration tests

#![allow(dead_code)]

use keystroke_engine::input::{
    keycodes, ActionsTemplate, EncoderDirection, KeystrokeEmitter, KeystrokeEvent, Keystroke,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Emitter that records every event it receives
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<KeystrokeEvent>>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<KeystrokeEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl KeystrokeEmitter for Recorder {
    fn issue_keystroke(&self, keystroke: Keystroke, pressed: bool) {
        self.events.lock().push(KeystrokeEvent { keystroke, pressed });
    }
}

pub fn key(keycode: u32) -> Keystroke {
    Keystroke::key(keycode)
}

/// Button 5: base A, B while button 2 is held
pub fn deck_template() -> ActionsTemplate {
    let mut template = ActionsTemplate::new();
    let action = template.button_mut(5);
    action.set_keystroke(key(keycodes::KEY_A));
    action.set_modified_keystroke(2, key(keycodes::KEY_B));

    template
        .encoder_mut(0, EncoderDirection::Clockwise)
        .set_keystroke(key(keycodes::KEY_VOLUMEUP));
    template
        .encoder_mut(0, EncoderDirection::CounterClockwise)
        .set_keystroke(key(keycodes::KEY_VOLUMEDOWN));
    template
}

/// Every input in the template maps to `keycode`
pub fn uniform_template(keycode: u32) -> ActionsTemplate {
    let mut template = ActionsTemplate::new();
    for button in 0..8 {
        template.button_mut(button).set_keystroke(key(keycode));
    }
    for direction in [EncoderDirection::Clockwise, EncoderDirection::CounterClockwise] {
        template.encoder_mut(0, direction).set_keystroke(key(keycode));
    }
    template
}
