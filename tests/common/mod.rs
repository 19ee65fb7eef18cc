#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::Value;
use sockbridge::{Action, Config, LocalChannel, SocketMiddleware, Store};

/// Reducer state: the JSON view of every applied action, in order.
pub type Log = Vec<Value>;

pub fn record(log: &mut Log, action: &Action) {
    log.push(action.to_value());
}

/// Store with the bridging middleware installed over a fresh loopback channel.
pub fn bridged() -> (Arc<Store<Log>>, Arc<LocalChannel>) {
    bridged_with(Config::default())
}

pub fn bridged_with(cfg: Config) -> (Arc<Store<Log>>, Arc<LocalChannel>) {
    let channel = Arc::new(LocalChannel::new(&cfg));
    let store = Store::builder(Log::new(), record)
        .with_middleware(Arc::new(SocketMiddleware::new(channel.clone(), &cfg)))
        .with_config(cfg)
        .build();
    (store, channel)
}

/// Types of the actions the reducer saw.
pub fn types(store: &Store<Log>) -> Vec<String> {
    store.with_state(|log| {
        log.iter()
            .map(|v| v["type"].as_str().unwrap_or_default().to_string())
            .collect()
    })
}

/// Collects every value a handler is called with.
#[derive(Default, Clone)]
pub struct Inbox(Arc<Mutex<Vec<Value>>>);

impl Inbox {
    pub fn push(&self, v: &Value) {
        self.0.lock().unwrap().push(v.clone());
    }

    pub fn items(&self) -> Vec<Value> {
        self.0.lock().unwrap().clone()
    }
}
