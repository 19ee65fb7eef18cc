//! # Dispatched values.
//!
//! Everything that flows through a dispatch pipeline is an [`Action`]. Only
//! [`Action::Intent`] is interpreted by the bridging middleware; every other
//! variant passes through it untouched.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::BridgeError;
use crate::intents::Intent;
use crate::middleware::DispatchRef;

use super::{Notification, Outcome};

type DeferredFn = dyn Fn(&DispatchRef) -> Result<Outcome, BridgeError> + Send + Sync;

/// Value passed to `dispatch`.
#[derive(Debug, Clone)]
pub enum Action {
    /// Channel-control intent.
    Intent(Intent),
    /// Provenance or receive record.
    Notify(Notification),
    /// Application action object (any JSON value).
    Raw(Value),
    /// Callable deferred action.
    Deferred(Deferred),
}

impl Action {
    /// Wraps a JSON action, decoding it as an intent when it matches the vocabulary.
    ///
    /// ```
    /// use serde_json::json;
    /// use sockbridge::Action;
    ///
    /// assert!(matches!(Action::from_value(json!({"type": "EMIT", "event": "x"})), Action::Intent(_)));
    /// assert!(matches!(Action::from_value(json!({"type": "ADD_TODO"})), Action::Raw(_)));
    /// ```
    pub fn from_value(value: Value) -> Self {
        match Intent::from_value(&value) {
            Some(intent) => Action::Intent(intent),
            None => Action::Raw(value),
        }
    }

    /// Display type used by logs and observers.
    pub fn type_str(&self) -> String {
        match self {
            Action::Intent(i) => i.kind().as_str().to_string(),
            Action::Notify(n) => n.type_str(),
            Action::Raw(v) => v
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("@@raw")
                .to_string(),
            Action::Deferred(_) => "@@deferred".to_string(),
        }
    }

    /// JSON view used by observers.
    pub fn to_value(&self) -> Value {
        match self {
            Action::Intent(i) => i.to_value(),
            Action::Notify(n) => n.to_value(),
            Action::Raw(v) => v.clone(),
            Action::Deferred(d) => json!({ "type": "@@deferred", "name": d.name() }),
        }
    }

    /// Returns the notification if this is one.
    pub fn as_notification(&self) -> Option<&Notification> {
        match self {
            Action::Notify(n) => Some(n),
            _ => None,
        }
    }
}

impl From<Intent> for Action {
    fn from(intent: Intent) -> Self {
        Action::Intent(intent)
    }
}

impl From<Notification> for Action {
    fn from(note: Notification) -> Self {
        Action::Notify(note)
    }
}

impl From<Deferred> for Action {
    fn from(d: Deferred) -> Self {
        Action::Deferred(d)
    }
}

/// Callable action run by the pipeline with its dispatch capability.
///
/// ## Example
/// ```rust
/// use serde_json::json;
/// use sockbridge::{intents, Action, Deferred, Dispatch};
///
/// let later = Deferred::new("greet", |dispatch| {
///     dispatch.dispatch(intents::emit("chat:message", json!({"text": "hi"})).into())
/// });
/// assert_eq!(Action::from(later).type_str(), "@@deferred");
/// ```
#[derive(Clone)]
pub struct Deferred {
    name: Cow<'static, str>,
    f: Arc<DeferredFn>,
}

impl Deferred {
    /// Creates a deferred action.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&DispatchRef) -> Result<Outcome, BridgeError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    /// Name used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the deferred body.
    pub fn run(&self, dispatch: &DispatchRef) -> Result<Outcome, BridgeError> {
        (self.f)(dispatch)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value_falls_back_to_raw() {
        let a = Action::from_value(json!({"type": "ADD_TODO", "text": "x"}));
        assert!(matches!(a, Action::Raw(_)));
        assert_eq!(a.type_str(), "ADD_TODO");

        let untyped = Action::from_value(json!(12));
        assert_eq!(untyped.type_str(), "@@raw");
    }

    #[test]
    fn test_notification_type_str() {
        let a: Action = Notification::Unsubscribe {
            event: "chat".into(),
        }
        .into();
        assert_eq!(a.type_str(), "UNSUBSCRIBE chat");
        assert!(a.as_notification().is_some());
    }
}
