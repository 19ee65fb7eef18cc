//! # Dispatch results.
//!
//! [`Outcome`] is what a dispatch returns. A successful `SUBSCRIBE` returns a
//! [`Subscription`]: the only capability that can later remove the listener.

use std::sync::Arc;

use serde_json::Value;

use crate::handlers::HandlerRef;
use crate::intents::Intent;

/// Result of dispatching an [`Action`](crate::Action).
#[derive(Debug, Clone)]
pub enum Outcome {
    /// An `EMIT` was handed to the channel.
    Emitted,
    /// A listener was registered.
    Subscribed(Subscription),
    /// A listener was removed. Carries nothing.
    Unsubscribed,
    /// The action reached the store's reducer.
    Reduced,
    /// Arbitrary value returned by a pipeline stage.
    Value(Value),
}

impl Outcome {
    /// Returns the subscription for `Subscribed`.
    pub fn subscription(&self) -> Option<&Subscription> {
        match self {
            Outcome::Subscribed(s) => Some(s),
            _ => None,
        }
    }

    /// Consumes the outcome, returning the subscription for `Subscribed`.
    pub fn into_subscription(self) -> Option<Subscription> {
        match self {
            Outcome::Subscribed(s) => Some(s),
            _ => None,
        }
    }
}

/// Handle to a registered listener.
///
/// Keep it: dropping it leaves the listener registered for the lifetime of
/// the channel, since removal needs the exact handler it holds.
#[derive(Debug, Clone)]
pub struct Subscription {
    event: Arc<str>,
    handler: HandlerRef,
}

impl Subscription {
    pub(crate) fn new(event: Arc<str>, handler: HandlerRef) -> Self {
        Self { event, handler }
    }

    /// Event the listener is registered for.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// The registered handler (the caller's own, or the synthesized default).
    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }

    /// Invokes the registered handler directly.
    pub fn call(&self, data: &Value) {
        self.handler.call(data)
    }

    /// Builds the `UNSUBSCRIBE` intent that removes this listener.
    pub fn unsubscribe_intent(&self) -> Intent {
        Intent::Unsubscribe {
            event: Arc::clone(&self.event),
            handler: Some(self.handler.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerFn;
    use crate::intents::IntentKind;

    #[test]
    fn test_unsubscribe_intent_carries_same_handler() {
        let h = HandlerFn::handler_ref("h", |_: &Value| {});
        let sub = Subscription::new("chat".into(), h.clone());

        let intent = sub.unsubscribe_intent();
        assert_eq!(intent.kind(), IntentKind::Unsubscribe);
        assert_eq!(intent.event(), "chat");
        assert!(intent.handler().is_some_and(|x| x.same(&h)));
    }

    #[test]
    fn test_outcome_accessors() {
        let h = HandlerFn::handler_ref("h", |_: &Value| {});
        let out = Outcome::Subscribed(Subscription::new("chat".into(), h));
        assert!(out.subscription().is_some());
        assert!(out.into_subscription().is_some());
        assert!(Outcome::Emitted.subscription().is_none());
    }
}
