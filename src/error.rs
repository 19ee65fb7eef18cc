//! Error types used by the bridging middleware, the store and channels.
//!
//! This module defines two enums:
//!
//! - [`BridgeError`]: errors surfaced to the caller of a dispatch.
//! - [`ChannelError`]: errors raised by a [`Channel`](crate::Channel) collaborator.
//!
//! Both provide `as_label` for logs/metrics.

use std::sync::Arc;

use thiserror::Error;

/// # Errors produced by a dispatch.
///
/// Only [`BridgeError::InvalidUnsubscribe`] originates in the middleware itself.
/// Channel failures pass through unchanged; they are never retried.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BridgeError {
    /// An `UNSUBSCRIBE` intent arrived without a callable handler.
    ///
    /// Listener removal needs the exact callback that was registered, so an
    /// event name alone is rejected before the channel is touched.
    #[error("cannot unsubscribe from {event:?}: no callable handler supplied")]
    InvalidUnsubscribe {
        /// Event the caller tried to unsubscribe from.
        event: Arc<str>,
    },

    /// The channel collaborator rejected the operation.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// The dispatch pipeline could not accept the action.
    #[error("dispatch rejected: {reason}")]
    Dispatch {
        /// Why the pipeline refused.
        reason: String,
    },
}

impl BridgeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use sockbridge::BridgeError;
    ///
    /// let err = BridgeError::InvalidUnsubscribe { event: "chat".into() };
    /// assert_eq!(err.as_label(), "invalid_unsubscribe");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BridgeError::InvalidUnsubscribe { .. } => "invalid_unsubscribe",
            BridgeError::Channel(e) => e.as_label(),
            BridgeError::Dispatch { .. } => "dispatch_rejected",
        }
    }

    /// True if the error came from the channel collaborator.
    pub fn is_channel(&self) -> bool {
        matches!(self, BridgeError::Channel(_))
    }
}

/// # Errors produced by a channel.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The channel was closed; no further sends or registrations.
    #[error("channel closed")]
    Closed,

    /// Transport-level failure reported by the underlying connection.
    #[error("transport failure: {reason}")]
    Transport {
        /// The underlying error message.
        reason: String,
    },
}

impl ChannelError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ChannelError::Closed => "channel_closed",
            ChannelError::Transport { .. } => "channel_transport",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_unsubscribe_message_names_event() {
        let err = BridgeError::InvalidUnsubscribe {
            event: "chat:message".into(),
        };
        assert!(err.to_string().contains("chat:message"));
        assert!(!err.is_channel());
    }

    #[test]
    fn test_channel_error_is_transparent() {
        let err: BridgeError = ChannelError::Transport {
            reason: "reset by peer".into(),
        }
        .into();
        assert_eq!(err.to_string(), "transport failure: reset by peer");
        assert_eq!(err.as_label(), "channel_transport");
        assert!(err.is_channel());
    }
}
