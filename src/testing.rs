//! Test doubles shared by unit tests.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::actions::{Action, Outcome};
use crate::channel::Channel;
use crate::error::{BridgeError, ChannelError};
use crate::handlers::HandlerRef;
use crate::middleware::Dispatch;

/// Dispatch target that records every action.
#[derive(Default)]
pub struct RecordingDispatch {
    actions: Mutex<Vec<Action>>,
    fail: bool,
}

impl RecordingDispatch {
    /// Records, then rejects every dispatch.
    pub fn failing() -> Self {
        Self {
            actions: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn len(&self) -> usize {
        self.actions.lock().unwrap().len()
    }

    /// JSON views of the recorded actions, in order.
    pub fn values(&self) -> Vec<Value> {
        self.actions
            .lock()
            .unwrap()
            .iter()
            .map(Action::to_value)
            .collect()
    }
}

impl Dispatch for RecordingDispatch {
    fn dispatch(&self, action: Action) -> Result<Outcome, BridgeError> {
        self.actions.lock().unwrap().push(action);
        if self.fail {
            return Err(BridgeError::Dispatch {
                reason: "recording dispatch set to fail".into(),
            });
        }
        Ok(Outcome::Reduced)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelCall {
    Send {
        event: String,
        payload: Value,
        /// Dispatches recorded by the watched target when `send` ran.
        dispatched_before: usize,
    },
    Add {
        event: String,
        handler: HandlerRef,
    },
    Remove {
        event: String,
        handler: HandlerRef,
    },
}

/// Channel that only records calls.
#[derive(Default)]
pub struct RecordingChannel {
    calls: Mutex<Vec<ChannelCall>>,
    watched: Mutex<Option<Arc<RecordingDispatch>>>,
}

impl RecordingChannel {
    /// Snapshot the number of dispatches seen by `rec` on each send.
    pub fn watch_dispatch(&self, rec: Arc<RecordingDispatch>) {
        *self.watched.lock().unwrap() = Some(rec);
    }

    pub fn calls(&self) -> Vec<ChannelCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn added(&self) -> Vec<(String, HandlerRef)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ChannelCall::Add { event, handler } => Some((event, handler)),
                _ => None,
            })
            .collect()
    }

    pub fn removed(&self) -> Vec<(String, HandlerRef)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ChannelCall::Remove { event, handler } => Some((event, handler)),
                _ => None,
            })
            .collect()
    }
}

impl Channel for RecordingChannel {
    fn send(&self, event: &str, payload: Value) -> Result<(), ChannelError> {
        let dispatched_before = self
            .watched
            .lock()
            .unwrap()
            .as_ref()
            .map_or(0, |r| r.len());
        self.calls.lock().unwrap().push(ChannelCall::Send {
            event: event.to_string(),
            payload,
            dispatched_before,
        });
        Ok(())
    }

    fn add_listener(&self, event: &str, handler: HandlerRef) -> Result<(), ChannelError> {
        self.calls.lock().unwrap().push(ChannelCall::Add {
            event: event.to_string(),
            handler,
        });
        Ok(())
    }

    fn remove_listener(&self, event: &str, handler: &HandlerRef) -> Result<(), ChannelError> {
        self.calls.lock().unwrap().push(ChannelCall::Remove {
            event: event.to_string(),
            handler: handler.clone(),
        });
        Ok(())
    }

    fn close(&self) {}

    fn is_closed(&self) -> bool {
        false
    }
}
