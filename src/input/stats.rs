//! Event statistics

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of engine counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Button press and release events handled
    pub button_events: u64,
    /// Encoder events handled (including zero-count events)
    pub encoder_events: u64,
    /// Encoder detents that produced keystrokes
    pub encoder_detents: u64,
    /// Press and release events handed to the emitter
    pub keystrokes_emitted: u64,
    /// Events whose keystroke resolved to `NONE`
    pub events_suppressed: u64,
    /// Templates loaded
    pub template_loads: u64,
}

/// Lock-free counters updated on the event path
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    button_events: AtomicU64,
    encoder_events: AtomicU64,
    encoder_detents: AtomicU64,
    keystrokes_emitted: AtomicU64,
    events_suppressed: AtomicU64,
    template_loads: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record_button(&self) {
        self.button_events.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_encoder(&self) {
        self.encoder_events.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_detents(&self, detents: u64) {
        self.encoder_detents.fetch_add(detents, Ordering::Relaxed);
    }

    pub(crate) fn record_emitted(&self, events: u64) {
        self.keystrokes_emitted.fetch_add(events, Ordering::Relaxed);
    }

    pub(crate) fn record_suppressed(&self) {
        self.events_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_template_load(&self) {
        self.template_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> EngineStats {
        EngineStats {
            button_events: self.button_events.load(Ordering::Relaxed),
            encoder_events: self.encoder_events.load(Ordering::Relaxed),
            encoder_detents: self.encoder_detents.load(Ordering::Relaxed),
            keystrokes_emitted: self.keystrokes_emitted.load(Ordering::Relaxed),
            events_suppressed: self.events_suppressed.load(Ordering::Relaxed),
            template_loads: self.template_loads.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_snapshot() {
        let counters = StatsCounters::default();
        assert_eq!(counters.snapshot(), EngineStats::default());

        counters.record_button();
        counters.record_button();
        counters.record_encoder();
        counters.record_detents(3);
        counters.record_emitted(6);
        counters.record_suppressed();
        counters.record_template_load();

        let stats = counters.snapshot();
        assert_eq!(stats.button_events, 2);
        assert_eq!(stats.encoder_events, 1);
        assert_eq!(stats.encoder_detents, 3);
        assert_eq!(stats.keystrokes_emitted, 6);
        assert_eq!(stats.events_suppressed, 1);
        assert_eq!(stats.template_loads, 1);
    }
}
