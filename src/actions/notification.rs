//! # Provenance and receive records.
//!
//! The bridging middleware dispatches a [`Notification`] before every channel
//! side effect so observers can see what was sent or registered. Inbound data
//! arrives as [`Notification::Receive`].
//!
//! ## Shapes
//! ```text
//! Emit         { "type": "EMIT: <event>", "action": "<channel> EMIT", "data": <payload> }
//! Subscribe    { "type": "SUBSCRIBE: <event>", "event": <event>, "handle": <name|null> }
//! Unsubscribe  { "type": "UNSUBSCRIBE <event>", "event": <event> }
//! Receive      { "type": "RECEIVE: <event>", "data": <data> }
//! ```

use std::sync::Arc;

use serde_json::{json, Value};

/// Record describing a channel operation or an inbound event.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// An event is about to be sent.
    Emit {
        /// Event name.
        event: Arc<str>,
        /// Channel label from [`Config::channel_label`](crate::Config).
        channel: Arc<str>,
        /// Payload being sent.
        data: Value,
    },
    /// A listener is about to be registered.
    Subscribe {
        /// Event name.
        event: Arc<str>,
        /// `"Custom: <name>"` for a caller-supplied handler, `None` otherwise.
        handle: Option<String>,
    },
    /// A listener is about to be removed.
    Unsubscribe {
        /// Event name.
        event: Arc<str>,
    },
    /// Inbound data delivered to a default handler.
    Receive {
        /// Event name.
        event: Arc<str>,
        /// Inbound payload.
        data: Value,
    },
}

impl Notification {
    /// Display type, e.g. `"EMIT: chat"` or `"UNSUBSCRIBE chat"`.
    pub fn type_str(&self) -> String {
        match self {
            Notification::Emit { event, .. } => format!("EMIT: {event}"),
            Notification::Subscribe { event, .. } => format!("SUBSCRIBE: {event}"),
            Notification::Unsubscribe { event } => format!("UNSUBSCRIBE {event}"),
            Notification::Receive { event, .. } => format!("RECEIVE: {event}"),
        }
    }

    /// Event name the record is about.
    pub fn event(&self) -> &str {
        match self {
            Notification::Emit { event, .. }
            | Notification::Subscribe { event, .. }
            | Notification::Unsubscribe { event }
            | Notification::Receive { event, .. } => event,
        }
    }

    /// True for inbound records.
    #[inline]
    pub fn is_receive(&self) -> bool {
        matches!(self, Notification::Receive { .. })
    }

    /// Renders the record shape.
    pub fn to_value(&self) -> Value {
        let ty = self.type_str();
        match self {
            Notification::Emit { channel, data, .. } => json!({
                "type": ty,
                "action": format!("{channel} EMIT"),
                "data": data,
            }),
            Notification::Subscribe { event, handle } => json!({
                "type": ty,
                "event": &**event,
                "handle": handle,
            }),
            Notification::Unsubscribe { event } => json!({
                "type": ty,
                "event": &**event,
            }),
            Notification::Receive { data, .. } => json!({
                "type": ty,
                "data": data,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_shape() {
        let n = Notification::Emit {
            event: "chat:message".into(),
            channel: "socket".into(),
            data: json!({"text": "hi"}),
        };
        assert_eq!(
            n.to_value(),
            json!({"type": "EMIT: chat:message", "action": "socket EMIT", "data": {"text": "hi"}})
        );
    }

    #[test]
    fn test_subscribe_shape_with_and_without_handle() {
        let custom = Notification::Subscribe {
            event: "chat".into(),
            handle: Some("Custom: onChat".into()),
        };
        assert_eq!(
            custom.to_value(),
            json!({"type": "SUBSCRIBE: chat", "event": "chat", "handle": "Custom: onChat"})
        );

        let default = Notification::Subscribe {
            event: "chat".into(),
            handle: None,
        };
        assert_eq!(default.to_value()["handle"], Value::Null);
    }

    #[test]
    fn test_unsubscribe_type_has_no_colon() {
        let n = Notification::Unsubscribe {
            event: "chat".into(),
        };
        assert_eq!(n.to_value(), json!({"type": "UNSUBSCRIBE chat", "event": "chat"}));
    }

    #[test]
    fn test_receive_shape() {
        let n = Notification::Receive {
            event: "chat".into(),
            data: json!(5),
        };
        assert!(n.is_receive());
        assert_eq!(n.event(), "chat");
        assert_eq!(n.to_value(), json!({"type": "RECEIVE: chat", "data": 5}));
    }
}
