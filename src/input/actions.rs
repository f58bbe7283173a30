//! Action Registry
//!
//! [`Actions`] owns the button and encoder mapping tables, tracks which
//! buttons are held, and turns raw device events into keystroke emissions.
//!
//! # Locking
//!
//! Two guards protect two pieces of state:
//!
//! - the mapping-table lock (`RwLock`) over both tables, taken for reading on
//!   every lookup and for writing for the whole swap in
//!   [`Actions::load_template`], so no reader sees a half-loaded template;
//! - the pressed-set lock (`Mutex`) over the held buttons.
//!
//! A button event holds the pressed-set lock across resolution and its own
//! insert/remove, so the keystroke is resolved against exactly the state the
//! event is applied to. Acquisition order is always pressed-set, then
//! mapping-table. Nothing is emitted while either lock is held.

use parking_lot::{Mutex, RwLock};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, trace};

use crate::input::action::Action;
use crate::input::emitter::KeystrokeEmitter;
use crate::input::keystroke::Keystroke;
use crate::input::stats::{EngineStats, StatsCounters};
use crate::input::template::{ActionsTemplate, ButtonId, EncoderDirection, EncoderId};

/// Registry of button and encoder actions for one device session
pub struct Actions {
    /// Button and encoder tables, replaced wholesale on template load
    tables: RwLock<ActionsTemplate>,

    /// Buttons currently held; doubles as the active modifier set
    pressed: Mutex<BTreeSet<ButtonId>>,

    /// Where resolved keystrokes go
    emitter: Arc<dyn KeystrokeEmitter>,

    stats: StatsCounters,
}

impl Actions {
    /// Create a registry with empty tables
    pub fn new<E>(emitter: E) -> Self
    where
        E: KeystrokeEmitter + 'static,
    {
        Self::with_shared_emitter(Arc::new(emitter))
    }

    /// Create a registry that shares an existing emitter
    pub fn with_shared_emitter(emitter: Arc<dyn KeystrokeEmitter>) -> Self {
        Self {
            tables: RwLock::new(ActionsTemplate::default()),
            pressed: Mutex::new(BTreeSet::new()),
            emitter,
            stats: StatsCounters::default(),
        }
    }

    /// Keystroke `button` resolves to with the currently held buttons
    ///
    /// Unknown buttons resolve to `Keystroke::NONE`.
    pub fn button_keystroke(&self, button: ButtonId) -> Keystroke {
        let held = self.pressed.lock();
        self.resolve_button(button, &held)
    }

    /// Keystroke `encoder` resolves to in `direction` with the currently held buttons
    ///
    /// Unknown encoders resolve to `Keystroke::NONE`.
    pub fn encoder_keystroke(&self, encoder: EncoderId, direction: EncoderDirection) -> Keystroke {
        let held = self.pressed.lock();
        let tables = self.tables.read();
        tables
            .encoder_actions
            .get(&encoder)
            .map_or(Keystroke::NONE, |actions| {
                actions.get(direction).desired_keystroke(&held)
            })
    }

    /// Handle a button press or release
    ///
    /// The keystroke is resolved against the held buttons as they were before
    /// this event, so a button never modifies itself.
    pub fn issue_button(&self, button: ButtonId, pressed: bool) {
        self.stats.record_button();

        let keystroke = {
            let mut held = self.pressed.lock();
            let keystroke = self.resolve_button(button, &held);
            if pressed {
                held.insert(button);
            } else {
                held.remove(&button);
            }
            keystroke
        };

        if keystroke.is_none() {
            trace!("Button {} {}: no keystroke", button, press_label(pressed));
            self.stats.record_suppressed();
            return;
        }

        debug!(
            "Button {} {} -> {}",
            button,
            press_label(pressed),
            keystroke
        );
        self.emitter.issue_keystroke(keystroke, pressed);
        self.stats.record_emitted(1);
    }

    /// Handle an encoder turn of `count` detents
    ///
    /// Positive counts are clockwise. Each detent emits a full press/release
    /// pair of the keystroke resolved once for the whole turn. A zero count
    /// does nothing.
    pub fn issue_encoder(&self, encoder: EncoderId, count: i8) {
        self.stats.record_encoder();

        if count == 0 {
            trace!("Encoder {}: zero count", encoder);
            return;
        }

        let direction = EncoderDirection::from_count(count);
        let detents = count.unsigned_abs();
        let keystroke = self.encoder_keystroke(encoder, direction);

        if keystroke.is_none() {
            trace!("Encoder {} {} x{}: no keystroke", encoder, direction, detents);
            self.stats.record_suppressed();
            return;
        }

        debug!(
            "Encoder {} {} x{} -> {}",
            encoder, direction, detents, keystroke
        );
        for _ in 0..detents {
            self.emitter.issue_keystroke(keystroke, true);
            self.emitter.issue_keystroke(keystroke, false);
        }
        self.stats.record_detents(u64::from(detents));
        self.stats.record_emitted(2 * u64::from(detents));
    }

    /// Replace both mapping tables
    ///
    /// Held buttons are kept. A button held across the reload releases with
    /// whatever its new mapping resolves to.
    pub fn load_template(&self, template: ActionsTemplate) {
        let buttons = template.button_actions.len();
        let encoders = template.encoder_actions.len();
        let unmapped = template
            .button_actions
            .values()
            .filter(|action| action.is_empty())
            .count();
        if unmapped > 0 {
            debug!("Template has {} button entries with no keystroke", unmapped);
        }

        let previous = std::mem::replace(&mut *self.tables.write(), template);
        drop(previous);

        self.stats.record_template_load();
        info!(
            "Loaded action template: {} buttons, {} encoders",
            buttons, encoders
        );
    }

    /// Copy of the current tables, taken under one read lock
    pub fn snapshot_template(&self) -> ActionsTemplate {
        self.tables.read().clone()
    }

    /// Copy of the action registered for `button`
    pub fn button_action(&self, button: ButtonId) -> Option<Action> {
        self.tables.read().button_actions.get(&button).cloned()
    }

    /// Copy of the action registered for `encoder` in `direction`
    pub fn encoder_action(&self, encoder: EncoderId, direction: EncoderDirection) -> Option<Action> {
        self.tables
            .read()
            .encoder_actions
            .get(&encoder)
            .map(|actions| actions.get(direction).clone())
    }

    /// Snapshot of the held buttons
    pub fn pressed_buttons(&self) -> BTreeSet<ButtonId> {
        self.pressed.lock().clone()
    }

    /// Check if a button is currently held
    pub fn is_pressed(&self, button: ButtonId) -> bool {
        self.pressed.lock().contains(&button)
    }

    /// Event counters
    pub fn stats(&self) -> EngineStats {
        self.stats.snapshot()
    }

    fn resolve_button(&self, button: ButtonId, held: &BTreeSet<ButtonId>) -> Keystroke {
        let tables = self.tables.read();
        tables
            .button_actions
            .get(&button)
            .map_or(Keystroke::NONE, |action| action.desired_keystroke(held))
    }
}

fn press_label(pressed: bool) -> &'static str {
    if pressed {
        "pressed"
    } else {
        "released"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::emitter::MockKeystrokeEmitter;
    use crate::input::keystroke::keycodes::*;
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn a() -> Keystroke {
        Keystroke::key(KEY_A)
    }

    fn b() -> Keystroke {
        Keystroke::key(KEY_B)
    }

    /// Button 5: base A, B while button 2 is held
    fn modifier_template() -> ActionsTemplate {
        let mut template = ActionsTemplate::new();
        let action = template.button_mut(5);
        action.set_keystroke(a());
        action.set_modified_keystroke(2, b());
        template
    }

    fn silent() -> MockKeystrokeEmitter {
        let mut mock = MockKeystrokeEmitter::new();
        mock.expect_issue_keystroke().never();
        mock
    }

    #[test]
    fn test_empty_registry() {
        let actions = Actions::new(silent());
        assert_eq!(actions.button_keystroke(0), Keystroke::NONE);
        assert_eq!(
            actions.encoder_keystroke(0, EncoderDirection::Clockwise),
            Keystroke::NONE
        );
        assert!(actions.pressed_buttons().is_empty());
        assert_eq!(actions.stats(), EngineStats::default());
    }

    #[test]
    fn test_unknown_button_only_tracks_state() {
        let actions = Actions::new(silent());

        actions.issue_button(9, true);
        assert!(actions.is_pressed(9));
        actions.issue_button(9, false);
        assert!(!actions.is_pressed(9));

        // Lookups never create entries
        assert!(actions.button_action(9).is_none());
        assert_eq!(actions.stats().events_suppressed, 2);
    }

    #[test]
    fn test_modifier_resolution() {
        let actions = Actions::new(silent());
        actions.load_template(modifier_template());

        assert_eq!(actions.button_keystroke(5), a());

        // Button 2 has no action of its own, pressing it only changes state
        actions.issue_button(2, true);
        assert_eq!(actions.button_keystroke(5), b());

        actions.issue_button(2, false);
        assert_eq!(actions.button_keystroke(5), a());
    }

    #[test]
    fn test_press_with_modifier_emits_override() {
        let mut mock = MockKeystrokeEmitter::new();
        mock.expect_issue_keystroke()
            .with(eq(b()), eq(true))
            .times(1)
            .return_const(());

        let actions = Actions::new(mock);
        actions.load_template(modifier_template());
        actions.issue_button(2, true);
        actions.issue_button(5, true);

        assert_eq!(actions.pressed_buttons(), BTreeSet::from([2, 5]));
    }

    #[test]
    fn test_press_release_pair() {
        let mut seq = Sequence::new();
        let mut mock = MockKeystrokeEmitter::new();
        mock.expect_issue_keystroke()
            .with(eq(a()), eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        mock.expect_issue_keystroke()
            .with(eq(a()), eq(false))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let actions = Actions::new(mock);
        actions.load_template(modifier_template());
        actions.issue_button(5, true);
        actions.issue_button(5, false);

        let stats = actions.stats();
        assert_eq!(stats.button_events, 2);
        assert_eq!(stats.keystrokes_emitted, 2);
    }

    #[test]
    fn test_button_is_not_its_own_modifier() {
        let mut template = ActionsTemplate::new();
        let action = template.button_mut(3);
        action.set_keystroke(a());
        action.set_modified_keystroke(3, b());

        let mut seq = Sequence::new();
        let mut mock = MockKeystrokeEmitter::new();
        mock.expect_issue_keystroke()
            .with(eq(a()), eq(true))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        // Button 3 is held by the time it is released
        mock.expect_issue_keystroke()
            .with(eq(b()), eq(false))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let actions = Actions::new(mock);
        actions.load_template(template);
        actions.issue_button(3, true);
        actions.issue_button(3, false);
    }

    #[test]
    fn test_encoder_repeats_pairs() {
        let mut template = ActionsTemplate::new();
        template
            .encoder_mut(0, EncoderDirection::Clockwise)
            .set_keystroke(Keystroke::key(KEY_VOLUMEUP));

        let mut seq = Sequence::new();
        let mut mock = MockKeystrokeEmitter::new();
        for _ in 0..3 {
            mock.expect_issue_keystroke()
                .with(eq(Keystroke::key(KEY_VOLUMEUP)), eq(true))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
            mock.expect_issue_keystroke()
                .with(eq(Keystroke::key(KEY_VOLUMEUP)), eq(false))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
        }

        let actions = Actions::new(mock);
        actions.load_template(template);
        actions.issue_encoder(0, 3);

        let stats = actions.stats();
        assert_eq!(stats.encoder_detents, 3);
        assert_eq!(stats.keystrokes_emitted, 6);
    }

    #[test]
    fn test_encoder_zero_count_is_noop() {
        let mut template = ActionsTemplate::new();
        template
            .encoder_mut(0, EncoderDirection::CounterClockwise)
            .set_keystroke(Keystroke::key(KEY_VOLUMEDOWN));

        let actions = Actions::new(silent());
        actions.load_template(template);
        actions.issue_encoder(0, 0);

        assert_eq!(actions.stats().encoder_events, 1);
        assert_eq!(actions.stats().encoder_detents, 0);
    }

    #[test]
    fn test_encoder_negative_uses_counter_clockwise() {
        let mut template = ActionsTemplate::new();
        template
            .encoder_mut(1, EncoderDirection::Clockwise)
            .set_keystroke(Keystroke::key(KEY_RIGHT));
        template
            .encoder_mut(1, EncoderDirection::CounterClockwise)
            .set_keystroke(Keystroke::key(KEY_LEFT));

        let mut mock = MockKeystrokeEmitter::new();
        mock.expect_issue_keystroke()
            .with(eq(Keystroke::key(KEY_LEFT)), mockall::predicate::always())
            .times(4)
            .return_const(());

        let actions = Actions::new(mock);
        actions.load_template(template);
        actions.issue_encoder(1, -2);
    }

    #[test]
    fn test_encoder_min_count() {
        let mut template = ActionsTemplate::new();
        template
            .encoder_mut(0, EncoderDirection::CounterClockwise)
            .set_keystroke(Keystroke::key(KEY_DOWN));

        let mut mock = MockKeystrokeEmitter::new();
        mock.expect_issue_keystroke().times(256).return_const(());

        let actions = Actions::new(mock);
        actions.load_template(template);
        actions.issue_encoder(0, i8::MIN);
        assert_eq!(actions.stats().encoder_detents, 128);
    }

    #[test]
    fn test_encoder_respects_modifiers() {
        let mut template = ActionsTemplate::new();
        let action = template.encoder_mut(0, EncoderDirection::Clockwise);
        action.set_keystroke(Keystroke::key(KEY_VOLUMEUP));
        action.set_modified_keystroke(7, Keystroke::key(KEY_RIGHT));

        let actions = Actions::new(silent());
        actions.load_template(template);

        assert_eq!(
            actions.encoder_keystroke(0, EncoderDirection::Clockwise),
            Keystroke::key(KEY_VOLUMEUP)
        );
        actions.issue_button(7, true);
        assert_eq!(
            actions.encoder_keystroke(0, EncoderDirection::Clockwise),
            Keystroke::key(KEY_RIGHT)
        );
    }

    #[test]
    fn test_load_template_replaces_tables_and_keeps_pressed() {
        let actions = Actions::new(silent());
        actions.load_template(modifier_template());
        actions.issue_button(2, true);

        let mut replacement = ActionsTemplate::new();
        replacement.button_mut(6).set_keystroke(Keystroke::key(KEY_C));
        actions.load_template(replacement.clone());

        assert_eq!(actions.button_keystroke(5), Keystroke::NONE);
        assert_eq!(actions.button_keystroke(6), Keystroke::key(KEY_C));
        assert!(actions.is_pressed(2));
        assert_eq!(actions.snapshot_template(), replacement);
        assert_eq!(actions.stats().template_loads, 2);
    }

    #[test]
    fn test_introspection_copies() {
        let actions = Actions::new(silent());
        actions.load_template(modifier_template());

        let action = actions.button_action(5).unwrap();
        assert_eq!(action.keystroke(), a());
        assert_eq!(action.modified_keystroke(2), b());
        assert!(actions
            .encoder_action(0, EncoderDirection::Clockwise)
            .is_none());
    }

    #[test]
    fn test_loaded_none_override_keeps_base_keystroke() {
        let mut mock = MockKeystrokeEmitter::new();
        mock.expect_issue_keystroke()
            .with(eq(a()), eq(true))
            .times(1)
            .return_const(());

        let template: ActionsTemplate = toml::from_str(
            r#"
            [button_actions.5]
            keystroke = { keycode = 30 }
            modifiers = { "2" = { keycode = 0 } }
            "#,
        )
        .unwrap();

        let actions = Actions::new(mock);
        actions.load_template(template);
        actions.issue_button(2, true);

        let action = actions.button_action(5).unwrap();
        assert!(action.modified_keystrokes().is_empty());
        assert_eq!(actions.button_keystroke(5), a());

        actions.issue_button(5, true);
    }
}
