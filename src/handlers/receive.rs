//! # Default inbound handler.
//!
//! [`ReceiveHandler`] is synthesized by the bridging middleware when a
//! `SUBSCRIBE` intent carries no handler of its own. It turns every inbound
//! payload into a `RECEIVE: <event>` notification dispatched back into the
//! pipeline, which is how channel traffic becomes store-visible state.
//!
//! ```text
//! channel event loop ──► ReceiveHandler::call(data)
//!                              └──► dispatch(Notify(Receive { event, data }))
//! ```

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::actions::{Action, Notification};
use crate::middleware::DispatchRef;

use super::Handler;

/// Handler that re-dispatches inbound data as a receive notification.
pub struct ReceiveHandler {
    event: Arc<str>,
    name: String,
    dispatch: DispatchRef,
}

impl ReceiveHandler {
    /// Creates a receive handler for `event` targeting `dispatch`.
    pub fn new(event: impl Into<Arc<str>>, dispatch: DispatchRef) -> Self {
        let event = event.into();
        let name = format!("receive:{event}");
        Self {
            event,
            name,
            dispatch,
        }
    }

    /// The event this handler was created for.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// The dispatch target notifications are sent to.
    pub fn target(&self) -> &DispatchRef {
        &self.dispatch
    }
}

impl Handler for ReceiveHandler {
    fn call(&self, data: &Value) {
        let note = Notification::Receive {
            event: Arc::clone(&self.event),
            data: data.clone(),
        };
        // Called from the channel loop; there is no caller to hand the error to.
        if let Err(err) = self.dispatch.dispatch(Action::Notify(note)) {
            warn!(event = %self.event, error = %err, "receive dispatch failed");
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingDispatch;
    use serde_json::json;

    #[test]
    fn test_call_dispatches_receive_record() {
        let rec = Arc::new(RecordingDispatch::default());
        let h = ReceiveHandler::new("chat:message", rec.clone());

        h.call(&json!({"text": "hi"}));

        let seen = rec.values();
        assert_eq!(
            seen,
            vec![json!({"type": "RECEIVE: chat:message", "data": {"text": "hi"}})]
        );
        assert_eq!(h.name(), "receive:chat:message");
    }

    #[test]
    fn test_dispatch_failure_is_swallowed() {
        let rec = Arc::new(RecordingDispatch::failing());
        let h = ReceiveHandler::new("chat", rec.clone());
        h.call(&json!(1));
        assert_eq!(rec.values().len(), 1);
    }
}
