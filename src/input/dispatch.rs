//! Keystroke Dispatch Queue
//!
//! Decouples keystroke injection from event handling. The hardware event
//! thread enqueues resolved keystrokes without blocking; a dedicated worker
//! thread drains them, in order, into the real injector.
//!
//! ```text
//! issue_button / issue_encoder
//!       ↓ try_send (never blocks)
//! ┌──────────────────────┐
//! │ crossbeam channel    │  bounded or unbounded
//! └──────────────────────┘
//!       ↓
//! keystroke-dispatch thread → sink emitter
//! ```

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, warn};

use crate::input::emitter::{KeystrokeEmitter, KeystrokeEvent};
use crate::input::error::{is_transient, EngineError, Result};
use crate::input::keystroke::Keystroke;

const WORKER_NAME: &str = "keystroke-dispatch";

/// Queue-backed emitter that forwards to a sink on its own thread
pub struct KeystrokeDispatcher {
    tx: Option<Sender<KeystrokeEvent>>,
    worker: Option<JoinHandle<()>>,
    /// 0 = unbounded
    capacity: usize,
    dropped: AtomicU64,
    delivered: Arc<AtomicU64>,
}

impl KeystrokeDispatcher {
    /// Start the worker thread
    ///
    /// `capacity` bounds the number of queued events; 0 means unbounded.
    pub fn spawn<E>(sink: E, capacity: usize) -> Result<Self>
    where
        E: KeystrokeEmitter + 'static,
    {
        let (tx, rx): (Sender<KeystrokeEvent>, Receiver<KeystrokeEvent>) = if capacity == 0 {
            unbounded()
        } else {
            bounded(capacity)
        };

        let delivered = Arc::new(AtomicU64::new(0));
        let worker_delivered = Arc::clone(&delivered);

        let worker = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || {
                for event in rx.iter() {
                    sink.issue_keystroke(event.keystroke, event.pressed);
                    worker_delivered.fetch_add(1, Ordering::Relaxed);
                }
                debug!("Keystroke dispatch queue drained, worker exiting");
            })
            .map_err(EngineError::DispatchSpawnFailed)?;

        debug!("Keystroke dispatcher started (capacity: {})", capacity);

        Ok(Self {
            tx: Some(tx),
            worker: Some(worker),
            capacity,
            dropped: AtomicU64::new(0),
            delivered,
        })
    }

    /// Enqueue an event without blocking
    pub fn try_send(&self, event: KeystrokeEvent) -> Result<()> {
        let tx = self.tx.as_ref().ok_or(EngineError::QueueDisconnected)?;
        tx.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => EngineError::QueueFull(self.capacity),
            TrySendError::Disconnected(_) => EngineError::QueueDisconnected,
        })
    }

    /// Queue capacity (0 = unbounded)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events waiting for the worker
    pub fn pending(&self) -> usize {
        self.tx.as_ref().map_or(0, Sender::len)
    }

    /// Events the worker has handed to the sink
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Events dropped because the queue was full or closed
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Close the queue, deliver everything already queued and stop the worker
    pub fn shutdown(mut self) -> Result<()> {
        self.close()
    }

    fn close(&mut self) -> Result<()> {
        // Dropping the only sender ends the worker's receive loop
        self.tx.take();

        match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| EngineError::DispatchPanicked),
            None => Ok(()),
        }
    }
}

impl KeystrokeEmitter for KeystrokeDispatcher {
    fn issue_keystroke(&self, keystroke: Keystroke, pressed: bool) {
        if let Err(e) = self.try_send(KeystrokeEvent { keystroke, pressed }) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            let kind = if pressed { "press" } else { "release" };
            if is_transient(&e) {
                warn!("Dropping {} of {}: {}", kind, keystroke, e);
            } else {
                error!("Dropping {} of {}: {}", kind, keystroke, e);
            }
        }
    }
}

impl Drop for KeystrokeDispatcher {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Keystroke dispatcher shutdown failed: {}", e);
        }
    }
}
