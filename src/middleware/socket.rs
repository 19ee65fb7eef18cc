//! # SocketMiddleware: intents in, channel operations out.
//!
//! [`SocketMiddleware`] owns one [`Channel`] for its whole life and translates
//! dispatched [`Intent`]s into channel calls. Everything else passes through.
//!
//! ## Flow
//! ```text
//! process(action)
//!   ├─ not an intent ──────────► next(action)            (result returned unchanged)
//!   ├─ EMIT        ──► dispatch(EMIT: <event>)         ──► channel.send(event, payload)
//!   ├─ SUBSCRIBE   ──► dispatch(SUBSCRIBE: <event>)    ──► channel.add_listener(event, h)
//!   │                   h = supplied handler | ReceiveHandler(dispatch, event)
//!   │                                                   └─► Subscription { event, h }
//!   └─ UNSUBSCRIBE ──► dispatch(UNSUBSCRIBE <event>)   ──► no handler? InvalidUnsubscribe
//!                                                       └─► channel.remove_listener(event, h)
//! ```
//!
//! ## Rules
//! - The provenance record is always dispatched **before** the side effect.
//! - An invalid unsubscribe never reaches the channel.
//! - Channel errors propagate as [`BridgeError::Channel`]; nothing is retried.
//! - No registry is kept: the returned [`Subscription`] is the only way back.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use serde_json::{json, Value};
//! use sockbridge::{
//!     intents, Action, BridgeError, Config, Dispatch, DispatchRef, LocalChannel, Middleware,
//!     Outcome, SocketMiddleware,
//! };
//!
//! struct Sink;
//! impl Dispatch for Sink {
//!     fn dispatch(&self, _action: Action) -> Result<Outcome, BridgeError> {
//!         Ok(Outcome::Reduced)
//!     }
//! }
//!
//! let cfg = Config::default();
//! let channel = Arc::new(LocalChannel::new(&cfg));
//! let mw = SocketMiddleware::new(channel.clone(), &cfg);
//! let dispatch: DispatchRef = Arc::new(Sink);
//! let next = |_: Action| -> Result<Outcome, BridgeError> { Ok(Outcome::Value(Value::Null)) };
//!
//! let out = mw.process(intents::emit("chat", json!("hi")).into(), &dispatch, &next)?;
//! assert!(matches!(out, Outcome::Emitted));
//! assert_eq!(channel.sent().len(), 1);
//! # Ok::<(), BridgeError>(())
//! ```

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::actions::{Action, Notification, Outcome, Subscription};
use crate::channel::Channel;
use crate::config::Config;
use crate::error::BridgeError;
use crate::handlers::{HandlerRef, ReceiveHandler};
use crate::intents::Intent;

use super::{Dispatch, DispatchRef, Middleware, Next};

/// Middleware bridging intents to a duplex channel.
pub struct SocketMiddleware {
    channel: Arc<dyn Channel>,
    label: Arc<str>,
}

impl SocketMiddleware {
    /// Creates the middleware around an already connected channel.
    pub fn new(channel: Arc<dyn Channel>, cfg: &Config) -> Self {
        Self {
            channel,
            label: cfg.channel_label.as_str().into(),
        }
    }

    /// The owned channel.
    pub fn channel(&self) -> &Arc<dyn Channel> {
        &self.channel
    }

    fn emit(
        &self,
        dispatch: &DispatchRef,
        event: Arc<str>,
        payload: Value,
    ) -> Result<Outcome, BridgeError> {
        dispatch.dispatch(Action::Notify(Notification::Emit {
            event: Arc::clone(&event),
            channel: Arc::clone(&self.label),
            data: payload.clone(),
        }))?;

        self.channel.send(&event, payload)?;
        Ok(Outcome::Emitted)
    }

    fn subscribe(
        &self,
        dispatch: &DispatchRef,
        event: Arc<str>,
        handler: Option<HandlerRef>,
    ) -> Result<Outcome, BridgeError> {
        dispatch.dispatch(Action::Notify(Notification::Subscribe {
            event: Arc::clone(&event),
            handle: handler.as_ref().map(|h| format!("Custom: {}", h.name())),
        }))?;

        let effective = match handler {
            Some(h) => h,
            None => HandlerRef::new(ReceiveHandler::new(
                Arc::clone(&event),
                Arc::clone(dispatch),
            )),
        };

        self.channel.add_listener(&event, effective.clone())?;
        Ok(Outcome::Subscribed(Subscription::new(event, effective)))
    }

    fn unsubscribe(
        &self,
        dispatch: &DispatchRef,
        event: Arc<str>,
        handler: Option<HandlerRef>,
    ) -> Result<Outcome, BridgeError> {
        dispatch.dispatch(Action::Notify(Notification::Unsubscribe {
            event: Arc::clone(&event),
        }))?;

        let Some(handler) = handler else {
            warn!(event = %event, "unsubscribe without a callable handler");
            return Err(BridgeError::InvalidUnsubscribe { event });
        };

        self.channel.remove_listener(&event, &handler)?;
        Ok(Outcome::Unsubscribed)
    }
}

impl Middleware for SocketMiddleware {
    fn process(
        &self,
        action: Action,
        dispatch: &DispatchRef,
        next: Next<'_>,
    ) -> Result<Outcome, BridgeError> {
        let intent = match action {
            Action::Intent(intent) => intent,
            other => return next(other),
        };
        debug!(kind = %intent.kind(), event = intent.event(), "intent");

        match intent {
            Intent::Emit { event, payload } => self.emit(dispatch, event, payload),
            Intent::Subscribe { event, handler } => self.subscribe(dispatch, event, handler),
            Intent::Unsubscribe { event, handler } => self.unsubscribe(dispatch, event, handler),
        }
    }

    fn name(&self) -> &'static str {
        "socket"
    }
}
