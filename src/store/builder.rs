use std::sync::Arc;

use tokio::{sync::broadcast, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::{
    config::Config,
    events::Bus,
    middleware::Middleware,
    observers::{Observe, ObserverSet},
};

use super::{runtime::Store, Reducer};

/// Builder for constructing a [`Store`] with optional middleware and observers.
pub struct StoreBuilder<S> {
    state: S,
    reducer: Box<dyn Reducer<S>>,
    middleware: Vec<Arc<dyn Middleware>>,
    observers: Vec<Arc<dyn Observe>>,
    cfg: Config,
}

impl<S: Send + 'static> StoreBuilder<S> {
    /// Creates a new builder with the initial state and reducer.
    pub fn new(state: S, reducer: impl Reducer<S>) -> Self {
        Self {
            state,
            reducer: Box::new(reducer),
            middleware: Vec::new(),
            observers: Vec::new(),
            cfg: Config::default(),
        }
    }

    /// Replaces the default configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Appends a middleware stage. Stages run in insertion order.
    pub fn with_middleware(mut self, mw: Arc<dyn Middleware>) -> Self {
        self.middleware.push(mw);
        self
    }

    /// Sets observers for applied actions.
    ///
    /// Observers get dedicated workers with bounded queues; building a store
    /// with observers requires a tokio runtime.
    pub fn with_observers(mut self, observers: Vec<Arc<dyn Observe>>) -> Self {
        self.observers = observers;
        self
    }

    /// Builds and returns the store.
    ///
    /// Initializes:
    /// - Event bus for broadcasting
    /// - Observer workers and the bus listener feeding them (if any observers)
    pub fn build(self) -> Arc<Store<S>> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let token = CancellationToken::new();

        let listener = if self.observers.is_empty() {
            None
        } else {
            Some(spawn_observer_listener(&bus, self.observers, token.clone()))
        };

        Store::new_internal(
            self.state,
            self.reducer,
            self.middleware,
            bus,
            self.cfg,
            token,
            listener,
        )
    }
}

/// Subscribes to the bus and forwards events to the observer set.
///
/// On cancellation the events already on the bus are drained, then the
/// observer workers are shut down.
fn spawn_observer_listener(
    bus: &Bus,
    observers: Vec<Arc<dyn Observe>>,
    token: CancellationToken,
) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    let set = ObserverSet::new(observers, bus.clone());

    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                res = rx.recv() => match res {
                    Ok(ev) => set.emit(&ev),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(skipped = n, "observer listener lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                _ = token.cancelled() => break,
            }
        }
        while let Ok(ev) = rx.try_recv() {
            set.emit(&ev);
        }
        set.shutdown().await;
    })
}
