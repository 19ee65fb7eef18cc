//! # Store events delivered to observers.
//!
//! The [`StoreEventKind`] enum classifies records published by the store:
//! - **Dispatch records**: an action reached the reducer
//! - **Observer records**: an observer panicked or dropped an event
//!
//! The [`StoreEvent`] struct carries the action type and its JSON view so
//! logging/devtools observers can render provenance records.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore order across observers.
//!
//! ## Example
//! ```rust
//! use serde_json::json;
//! use sockbridge::{Action, StoreEvent, StoreEventKind};
//!
//! let action = Action::Raw(json!({"type": "ADD_TODO", "text": "x"}));
//! let ev = StoreEvent::reduced(&action);
//!
//! assert_eq!(ev.kind, StoreEventKind::Reduced);
//! assert_eq!(ev.action_type.as_deref(), Some("ADD_TODO"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use serde_json::Value;

use crate::actions::Action;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of store events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEventKind {
    /// An action was applied by the reducer.
    ///
    /// Sets:
    /// - `action_type`: display type of the action
    /// - `data`: JSON view of the action
    Reduced,

    /// Observer panicked during event processing.
    ///
    /// Sets:
    /// - `observer`: observer name
    /// - `reason`: panic info/message
    ObserverPanicked,

    /// Observer dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `observer`: observer name
    /// - `reason`: `"full"` or `"closed"`
    ObserverOverflow,
}

/// Store event with optional metadata.
#[derive(Debug, Clone)]
pub struct StoreEvent {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: StoreEventKind,
    /// Display type of the action, e.g. `"EMIT: chat"`.
    pub action_type: Option<Arc<str>>,
    /// JSON view of the action.
    pub data: Option<Value>,
    /// Observer name, for observer records.
    pub observer: Option<Arc<str>>,
    /// Human-readable reason (overflow, panic details).
    pub reason: Option<Arc<str>>,
}

impl StoreEvent {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: StoreEventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            action_type: None,
            data: None,
            observer: None,
            reason: None,
        }
    }

    /// Creates a `Reduced` record for `action`.
    pub fn reduced(action: &Action) -> Self {
        Self::new(StoreEventKind::Reduced).with_action(action)
    }

    /// Attaches the action type and its JSON view.
    #[inline]
    pub fn with_action(mut self, action: &Action) -> Self {
        self.action_type = Some(action.type_str().into());
        self.data = Some(action.to_value());
        self
    }

    /// Attaches an observer name.
    #[inline]
    pub fn with_observer(mut self, name: impl Into<Arc<str>>) -> Self {
        self.observer = Some(name.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates an observer overflow event.
    #[inline]
    pub fn observer_overflow(observer: &'static str, reason: &'static str) -> Self {
        StoreEvent::new(StoreEventKind::ObserverOverflow)
            .with_observer(observer)
            .with_reason(reason)
    }

    /// Creates an observer panic event.
    #[inline]
    pub fn observer_panicked(observer: &'static str, info: String) -> Self {
        StoreEvent::new(StoreEventKind::ObserverPanicked)
            .with_observer(observer)
            .with_reason(info)
    }

    /// True for `ObserverOverflow` records.
    #[inline]
    pub fn is_observer_overflow(&self) -> bool {
        matches!(self.kind, StoreEventKind::ObserverOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Notification;
    use serde_json::json;

    #[test]
    fn test_seq_is_monotonic() {
        let a = StoreEvent::new(StoreEventKind::Reduced);
        let b = StoreEvent::new(StoreEventKind::Reduced);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_reduced_carries_provenance_view() {
        let note = Notification::Receive {
            event: "chat".into(),
            data: json!({"text": "hi"}),
        };
        let ev = StoreEvent::reduced(&note.into());
        assert_eq!(ev.action_type.as_deref(), Some("RECEIVE: chat"));
        assert_eq!(ev.data, Some(json!({"type": "RECEIVE: chat", "data": {"text": "hi"}})));
    }

    #[test]
    fn test_overflow_helper() {
        let ev = StoreEvent::observer_overflow("log", "full");
        assert!(ev.is_observer_overflow());
        assert_eq!(ev.observer.as_deref(), Some("log"));
        assert_eq!(ev.reason.as_deref(), Some("full"));
    }
}
