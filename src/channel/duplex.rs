//! # Duplex channel contract.
//!
//! [`Channel`] is the only thing the bridging middleware requires of a
//! real-time connection. Connection setup, reconnection and transport
//! negotiation belong to the implementor; the middleware receives a
//! connected channel and never recreates it.
//!
//! ## Rules
//! - `send` is fire-and-forget: no acknowledgement is awaited.
//! - `remove_listener` matches by handler **identity** ([`HandlerRef::same`]).
//! - Implementations serialize listener mutations themselves; the registration
//!   API is called synchronously from inside `dispatch`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ChannelError;
use crate::handlers::HandlerRef;

/// Connected duplex event channel.
pub trait Channel: Send + Sync + 'static {
    /// Sends `payload` as `event`.
    fn send(&self, event: &str, payload: Value) -> Result<(), ChannelError>;

    /// Registers `handler` to be invoked with the data of every inbound `event`.
    fn add_listener(&self, event: &str, handler: HandlerRef) -> Result<(), ChannelError>;

    /// Removes one registration of exactly `handler` for `event`.
    ///
    /// Removing a handler that is not registered is a no-op.
    fn remove_listener(&self, event: &str, handler: &HandlerRef) -> Result<(), ChannelError>;

    /// Closes the channel and drops every listener.
    fn close(&self);

    /// True once [`Channel::close`] was called.
    fn is_closed(&self) -> bool;
}

/// One event travelling over a channel, in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Event name.
    pub event: String,
    /// Event data.
    #[serde(default)]
    pub payload: Value,
}

impl Frame {
    /// Creates a frame.
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_frame_decodes_without_payload() {
        let f: Frame = serde_json::from_str(r#"{"event":"ping"}"#).unwrap();
        assert_eq!(f, Frame::new("ping", Value::Null));
    }

    #[test]
    fn test_frame_serializes_fields() {
        let f = Frame::new("chat", json!({"text": "hi"}));
        assert_eq!(
            serde_json::to_value(&f).unwrap(),
            json!({"event": "chat", "payload": {"text": "hi"}})
        );
    }
}
