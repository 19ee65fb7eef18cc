//! # Store: a minimal dispatch pipeline.
//!
//! The [`Store`] owns the state, a reducer, an ordered middleware chain and
//! the event bus observers listen on. It exists so the bridging middleware can
//! be installed and driven end to end; it is deliberately small.
//!
//! ## Dispatch path
//! ```text
//! dispatch(action)
//!   └─► mw[0].process(action, handle, next₀)
//!         └─► next₀(action) ─► mw[1].process(...) ─► ... ─► apply(action)
//!                                                          ├─ Deferred ─► run(handle)
//!                                                          └─ otherwise ─► reducer (under lock)
//!                                                                          └─► Bus.publish(Reduced)
//! ```
//!
//! ## Rules
//! - No lock is held while middleware run, so dispatch is **re-entrant**:
//!   provenance records and receive handlers dispatch from inside a dispatch.
//! - Reducers run under the state lock and must not dispatch.
//! - Dropping the store stops the observer listener; queued records are still
//!   delivered. `shutdown()` additionally waits for that to finish.
//! - The [`DispatchRef`] handed to middleware holds the store **weakly**, so
//!   listeners parked in a channel never keep the store alive. Dispatching
//!   through it after the store is dropped fails with [`BridgeError::Dispatch`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use sockbridge::{intents, Action, Config, LocalChannel, SocketMiddleware, Store};
//!
//! let cfg = Config::default();
//! let channel = Arc::new(LocalChannel::new(&cfg));
//!
//! let store = Store::builder(Vec::<String>::new(), |log: &mut Vec<String>, a: &Action| {
//!     log.push(a.type_str());
//! })
//! .with_middleware(Arc::new(SocketMiddleware::new(channel.clone(), &cfg)))
//! .build();
//!
//! let sub = store
//!     .dispatch(intents::subscribe("chat:message", None).into())
//!     .unwrap()
//!     .into_subscription()
//!     .unwrap();
//! channel.deliver("chat:message", &json!({"text": "hi"}));
//! store.dispatch(sub.unsubscribe_intent().into()).unwrap();
//!
//! assert_eq!(
//!     store.state(),
//!     vec!["SUBSCRIBE: chat:message", "RECEIVE: chat:message", "UNSUBSCRIBE chat:message"]
//! );
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::{sync::broadcast, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::{
    actions::{Action, Outcome},
    config::Config,
    error::BridgeError,
    events::{Bus, StoreEvent},
    middleware::{Dispatch, DispatchRef, Middleware},
};

use super::{Reducer, StoreBuilder};

/// State container with a middleware chain.
pub struct Store<S> {
    state: Mutex<S>,
    reducer: Box<dyn Reducer<S>>,
    middleware: Vec<Arc<dyn Middleware>>,
    bus: Bus,
    cfg: Config,
    handle: DispatchRef,
    token: CancellationToken,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl<S: Send + 'static> Store<S> {
    /// Starts building a store from an initial state and a reducer.
    pub fn builder(state: S, reducer: impl Reducer<S>) -> StoreBuilder<S> {
        StoreBuilder::new(state, reducer)
    }

    pub(super) fn new_internal(
        state: S,
        reducer: Box<dyn Reducer<S>>,
        middleware: Vec<Arc<dyn Middleware>>,
        bus: Bus,
        cfg: Config,
        token: CancellationToken,
        listener: Option<JoinHandle<()>>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|me: &Weak<Self>| Self {
            state: Mutex::new(state),
            reducer,
            middleware,
            bus,
            cfg,
            handle: Arc::new(StoreHandle { inner: me.clone() }),
            token,
            listener: Mutex::new(listener),
        })
    }

    /// Routes `action` through the middleware chain and the reducer.
    pub fn dispatch(&self, action: Action) -> Result<Outcome, BridgeError> {
        self.run(0, action)
    }

    /// Dispatch capability for this store (holds it weakly).
    pub fn handle(&self) -> DispatchRef {
        Arc::clone(&self.handle)
    }

    /// Runs `f` with a shared view of the state.
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&lock(&self.state))
    }

    /// Receiver for store events published after this call.
    pub fn events(&self) -> broadcast::Receiver<StoreEvent> {
        self.bus.subscribe()
    }

    /// Store configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Stops the observer listener after draining the bus, then waits for
    /// observer workers to finish their queues.
    pub async fn shutdown(&self) {
        self.token.cancel();
        let listener = lock(&self.listener).take();
        if let Some(h) = listener {
            let _ = h.await;
        }
    }

    fn run(&self, index: usize, action: Action) -> Result<Outcome, BridgeError> {
        match self.middleware.get(index) {
            Some(mw) => {
                trace!(middleware = mw.name(), action = %action.type_str(), "process");
                let next = |a: Action| self.run(index + 1, a);
                mw.process(action, &self.handle, &next)
            }
            None => self.apply(action),
        }
    }

    fn apply(&self, action: Action) -> Result<Outcome, BridgeError> {
        if let Action::Deferred(d) = &action {
            return d.run(&self.handle);
        }

        self.reducer.reduce(&mut lock(&self.state), &action);
        self.bus.publish(StoreEvent::reduced(&action));
        Ok(Outcome::Reduced)
    }
}

impl<S: Clone + Send + 'static> Store<S> {
    /// Returns a clone of the current state.
    pub fn state(&self) -> S {
        lock(&self.state).clone()
    }
}

impl<S: Send + 'static> Dispatch for Store<S> {
    fn dispatch(&self, action: Action) -> Result<Outcome, BridgeError> {
        Store::dispatch(self, action)
    }
}

impl<S> Drop for Store<S> {
    fn drop(&mut self) {
        // Lets the observer listener drain and stop without `shutdown()`.
        self.token.cancel();
    }
}

/// Weak dispatch handle given to middleware and default handlers.
struct StoreHandle<S> {
    inner: Weak<Store<S>>,
}

impl<S: Send + 'static> Dispatch for StoreHandle<S> {
    fn dispatch(&self, action: Action) -> Result<Outcome, BridgeError> {
        match self.inner.upgrade() {
            Some(store) => store.dispatch(action),
            None => Err(BridgeError::Dispatch {
                reason: "store dropped".to_string(),
            }),
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Deferred, Notification};
    use serde_json::json;

    fn recorder() -> Arc<Store<Vec<String>>> {
        Store::builder(Vec::new(), |log: &mut Vec<String>, a: &Action| {
            log.push(a.type_str());
        })
        .build()
    }

    struct Tag(&'static str);

    impl Middleware for Tag {
        fn process(
            &self,
            action: Action,
            dispatch: &DispatchRef,
            next: crate::middleware::Next<'_>,
        ) -> Result<Outcome, BridgeError> {
            if let Action::Raw(v) = &action {
                if v["type"] == json!("PING") {
                    dispatch.dispatch(Action::Raw(json!({"type": self.0})))?;
                }
            }
            next(action)
        }
    }

    #[test]
    fn test_plain_actions_reach_reducer() {
        let store = recorder();
        let out = store.dispatch(Action::Raw(json!({"type": "A"}))).unwrap();
        assert!(matches!(out, Outcome::Reduced));
        assert_eq!(store.state(), vec!["A"]);
    }

    #[test]
    fn test_middleware_may_reenter_dispatch() {
        let store = Store::builder(Vec::new(), |log: &mut Vec<String>, a: &Action| {
            log.push(a.type_str());
        })
        .with_middleware(Arc::new(Tag("first")))
        .with_middleware(Arc::new(Tag("second")))
        .build();

        store.dispatch(Action::Raw(json!({"type": "PING"}))).unwrap();

        // first re-dispatches before passing on; second sees both.
        assert_eq!(store.state(), vec!["first", "second", "PING"]);
    }

    #[test]
    fn test_deferred_runs_with_dispatch() {
        let store = recorder();
        let thunk = Deferred::new("twice", |d| {
            d.dispatch(Action::Raw(json!({"type": "X"})))?;
            d.dispatch(Action::Raw(json!({"type": "Y"})))
        });

        let out = store.dispatch(thunk.into()).unwrap();
        assert!(matches!(out, Outcome::Reduced));
        assert_eq!(store.state(), vec!["X", "Y"]);
    }

    #[test]
    fn test_bus_sees_reduced_actions() {
        let store = recorder();
        let mut rx = store.events();
        store
            .dispatch(
                Notification::Receive {
                    event: "chat".into(),
                    data: json!(1),
                }
                .into(),
            )
            .unwrap();

        let ev = rx.try_recv().unwrap();
        assert_eq!(ev.action_type.as_deref(), Some("RECEIVE: chat"));
    }

    #[test]
    fn test_handle_outliving_store_fails() {
        let store = recorder();
        let handle = store.handle();
        drop(store);

        let err = handle.dispatch(Action::Raw(json!({}))).unwrap_err();
        assert!(matches!(err, BridgeError::Dispatch { .. }));
    }
}
