//! # Channel-control intents.
//!
//! The [`Intent`] enum is the closed vocabulary the bridging middleware
//! intercepts. Each variant carries only the fields its kind needs:
//!
//! | Kind          | `event` | `handler`               | `payload` |
//! |---------------|---------|-------------------------|-----------|
//! | `EMIT`        | yes     | -                       | yes       |
//! | `SUBSCRIBE`   | yes     | optional                | -         |
//! | `UNSUBSCRIBE` | yes     | required at processing  | -         |
//!
//! ## Example
//! ```rust
//! use serde_json::json;
//! use sockbridge::{intents, IntentKind};
//!
//! let i = intents::emit("chat:message", json!({"text": "hi"}));
//! assert_eq!(i.kind(), IntentKind::Emit);
//! assert_eq!(i.event(), "chat:message");
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::handlers::HandlerRef;

/// Classification of intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    /// Register a listener for an event.
    Subscribe,
    /// Remove a previously registered listener.
    Unsubscribe,
    /// Send an event over the channel.
    Emit,
}

impl IntentKind {
    /// Wire name of the kind (`"SUBSCRIBE"`, `"UNSUBSCRIBE"`, `"EMIT"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Subscribe => "SUBSCRIBE",
            IntentKind::Unsubscribe => "UNSUBSCRIBE",
            IntentKind::Emit => "EMIT",
        }
    }

    /// Parses a wire name; anything outside the vocabulary is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUBSCRIBE" => Some(IntentKind::Subscribe),
            "UNSUBSCRIBE" => Some(IntentKind::Unsubscribe),
            "EMIT" => Some(IntentKind::Emit),
            _ => None,
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested channel operation.
#[derive(Debug, Clone)]
pub enum Intent {
    /// Send `payload` as `event`.
    Emit {
        /// Channel event name.
        event: Arc<str>,
        /// Data sent with the event.
        payload: Value,
    },
    /// Listen for `event`.
    Subscribe {
        /// Channel event name.
        event: Arc<str>,
        /// Custom listener; a default receive handler is used when `None`.
        handler: Option<HandlerRef>,
    },
    /// Stop listening for `event` with the given handler.
    Unsubscribe {
        /// Channel event name.
        event: Arc<str>,
        /// The handler returned by the matching subscribe.
        ///
        /// `None` only for intents decoded from raw actions; processing such an
        /// intent fails with [`BridgeError::InvalidUnsubscribe`](crate::BridgeError).
        handler: Option<HandlerRef>,
    },
}

impl Intent {
    /// Builds an `EMIT` intent.
    pub fn emit(event: impl Into<Arc<str>>, payload: Value) -> Self {
        Intent::Emit {
            event: event.into(),
            payload,
        }
    }

    /// Builds a `SUBSCRIBE` intent.
    pub fn subscribe(event: impl Into<Arc<str>>, handler: Option<HandlerRef>) -> Self {
        Intent::Subscribe {
            event: event.into(),
            handler,
        }
    }

    /// Builds an `UNSUBSCRIBE` intent.
    pub fn unsubscribe(event: impl Into<Arc<str>>, handler: HandlerRef) -> Self {
        Intent::Unsubscribe {
            event: event.into(),
            handler: Some(handler),
        }
    }

    /// Kind of this intent.
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::Emit { .. } => IntentKind::Emit,
            Intent::Subscribe { .. } => IntentKind::Subscribe,
            Intent::Unsubscribe { .. } => IntentKind::Unsubscribe,
        }
    }

    /// Event name this intent concerns.
    pub fn event(&self) -> &str {
        match self {
            Intent::Emit { event, .. }
            | Intent::Subscribe { event, .. }
            | Intent::Unsubscribe { event, .. } => event,
        }
    }

    /// Handler carried by the intent, if any.
    pub fn handler(&self) -> Option<&HandlerRef> {
        match self {
            Intent::Emit { .. } => None,
            Intent::Subscribe { handler, .. } | Intent::Unsubscribe { handler, .. } => {
                handler.as_ref()
            }
        }
    }

    /// Decodes a duck-typed action object.
    ///
    /// Recognized only when `type` is one of the three wire names and `event`
    /// is a non-empty string. A JSON value can never be callable, so `handler` is always
    /// `None`; for `EMIT` a missing `payload` becomes `null`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let kind = IntentKind::parse(value.get("type")?.as_str()?)?;
        let event: Arc<str> = value
            .get("event")?
            .as_str()
            .filter(|e| !e.is_empty())?
            .into();

        Some(match kind {
            IntentKind::Emit => Intent::Emit {
                event,
                payload: value.get("payload").cloned().unwrap_or(Value::Null),
            },
            IntentKind::Subscribe => Intent::Subscribe {
                event,
                handler: None,
            },
            IntentKind::Unsubscribe => Intent::Unsubscribe {
                event,
                handler: None,
            },
        })
    }

    /// JSON view for observers and logs.
    pub fn to_value(&self) -> Value {
        match self {
            Intent::Emit { event, payload } => json!({
                "type": IntentKind::Emit.as_str(),
                "event": &**event,
                "payload": payload,
            }),
            Intent::Subscribe { event, handler } | Intent::Unsubscribe { event, handler } => {
                json!({
                    "type": self.kind().as_str(),
                    "event": &**event,
                    "handler": handler.as_ref().map(|h| h.name()),
                })
            }
        }
    }
}

/// Builds an `EMIT` intent: send `payload` as `event`.
pub fn emit(event: impl Into<Arc<str>>, payload: Value) -> Intent {
    Intent::emit(event, payload)
}

/// Builds a `SUBSCRIBE` intent, optionally with a custom handler.
pub fn subscribe(event: impl Into<Arc<str>>, handler: Option<HandlerRef>) -> Intent {
    Intent::subscribe(event, handler)
}

/// Builds an `UNSUBSCRIBE` intent for a previously registered handler.
pub fn unsubscribe(event: impl Into<Arc<str>>, handler: HandlerRef) -> Intent {
    Intent::unsubscribe(event, handler)
}
