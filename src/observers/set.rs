//! # Non-blocking fan-out to multiple observers.
//!
//! Provides [`ObserverSet`] which distributes store events to observers
//! without blocking the dispatching thread.
//!
//! ## Architecture
//! ```text
//! emit(event)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► observer1.on_event()
//!     │    (bounded)         └──────► panic → ObserverPanicked
//!     ├──► [queue 2] ──► worker 2 ──► observer2.on_event()
//!     └──► [queue N] ──► worker N ──► observerN.on_event()
//! ```
//!
//! ## Rules
//! - **No cross-observer ordering**: observer A may process event N while B processes N+5
//! - **Overflow**: event dropped for that observer only, `ObserverOverflow` published
//! - **Non-blocking**: `emit()` uses `try_send` and never waits
//! - **Per-observer FIFO**: each observer sees events in order
//!
//! Panics are caught with `AssertUnwindSafe`; an observer that panics while
//! holding a lock of its own may leave that state inconsistent.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::warn;

use crate::events::{Bus, StoreEvent};

use super::Observe;

/// Per-observer channel metadata.
struct ObserverChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<StoreEvent>>,
}

/// Fan-out coordinator for store observers.
pub struct ObserverSet {
    channels: Vec<ObserverChannel>,
    workers: Vec<JoinHandle<()>>,
    bus: Bus,
}

impl ObserverSet {
    /// Creates a new set and spawns one worker task per observer.
    ///
    /// Must be called inside a tokio runtime.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn Observe>>, bus: Bus) -> Self {
        let (channels, workers) = observers
            .into_iter()
            .map(|obs| {
                let (sender, rx) = mpsc::channel(obs.queue_capacity().max(1));
                let name = obs.name();
                let worker = tokio::spawn(run_worker(obs, rx, bus.clone()));
                (ObserverChannel { name, sender }, worker)
            })
            .unzip();

        Self {
            channels,
            workers,
            bus,
        }
    }

    /// Emits an event to all observers (clones the event once).
    pub fn emit(&self, event: &StoreEvent) {
        self.emit_arc(Arc::new(event.clone()));
    }

    /// Emits a pre-allocated `Arc<StoreEvent>` to all observers.
    ///
    /// Overflow records are not re-published when they themselves overflow.
    pub fn emit_arc(&self, event: Arc<StoreEvent>) {
        let is_overflow_evt = event.is_observer_overflow();

        for channel in &self.channels {
            let reason = match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            if !is_overflow_evt {
                warn!(observer = channel.name, reason, "observer dropped event");
                self.bus
                    .publish(StoreEvent::observer_overflow(channel.name, reason));
            }
        }
    }

    /// True if there are no observers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Closes every queue and waits until each worker has drained its own.
    pub async fn shutdown(self) {
        let Self { channels, workers, .. } = self;
        drop(channels);
        for worker in workers {
            let _ = worker.await;
        }
    }
}

/// Feeds one observer until its queue closes; a panic is reported and the
/// worker moves on to the next event.
async fn run_worker(obs: Arc<dyn Observe>, mut rx: mpsc::Receiver<Arc<StoreEvent>>, bus: Bus) {
    while let Some(ev) = rx.recv().await {
        let res = AssertUnwindSafe(obs.on_event(&ev)).catch_unwind().await;
        if let Err(payload) = res {
            let info = panic_message(payload.as_ref());
            warn!(observer = obs.name(), info = %info, "observer panicked");
            bus.publish(StoreEvent::observer_panicked(obs.name(), info));
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&'static str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
