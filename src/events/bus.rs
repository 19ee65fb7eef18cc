//! # Event bus for broadcasting store events.
//!
//! [`Bus`] wraps a [`tokio::sync::broadcast`] sender. The store publishes one
//! record per reduced action; observer workers publish panic and overflow
//! records back onto the same bus.
//!
//! ```text
//! Store::dispatch ──┐
//!                   ├──► Bus ──► observer listener ──► ObserverSet
//! ObserverSet ──────┘      └───► Store::events()
//! ```
//!
//! Publishing is synchronous and never waits, so it is safe to call from
//! inside `dispatch`. Receivers that fall more than `capacity` records behind
//! get `RecvError::Lagged` and lose the oldest ones. A record published while
//! nobody listens is gone.

use tokio::sync::broadcast;

use super::event::StoreEvent;

/// Broadcast of [`StoreEvent`]s. Clones share one ring buffer.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<StoreEvent>,
}

impl Bus {
    /// Creates a bus holding up to `capacity` records (at least 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Bus { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers, the event is dropped.
    pub fn publish(&self, ev: StoreEvent) {
        let _ = self.tx.send(ev);
    }

    /// Receiver for records published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::StoreEventKind;

    #[test]
    fn test_receiver_sees_only_later_events() {
        let bus = Bus::new(0);
        bus.publish(StoreEvent::new(StoreEventKind::Reduced));

        let mut rx = bus.subscribe();
        let ev = StoreEvent::new(StoreEventKind::Reduced);
        let seq = ev.seq;
        bus.publish(ev);

        assert_eq!(rx.try_recv().unwrap().seq, seq);
        assert!(rx.try_recv().is_err());
    }
}
