//! # Demo: custom_handler
//!
//! Subscribes with a caller-supplied handler instead of the default one and
//! drives the bridge from a [`Deferred`] action.
//!
//! Shows how to:
//! - Build a handler from a closure with [`HandlerFn::handler_ref`].
//! - Dispatch a deferred action that itself dispatches intents.
//! - Inspect the provenance records the reducer receives.
//!
//! ## Run
//! ```bash
//! cargo run --example custom_handler
//! ```

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use serde_json::{json, Value};
use sockbridge::{
    intents, Action, Config, Deferred, Dispatch, HandlerFn, LocalChannel, SocketMiddleware, Store,
};

fn main() -> anyhow::Result<()> {
    let cfg = Config {
        channel_label: "ws".into(),
        ..Config::default()
    };
    let channel = Arc::new(LocalChannel::new(&cfg));

    let store = Store::builder(Vec::<Value>::new(), |log: &mut Vec<Value>, a: &Action| {
        log.push(a.to_value());
    })
    .with_middleware(Arc::new(SocketMiddleware::new(channel.clone(), &cfg)))
    .build();

    let hits = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&hits);
    let on_presence = HandlerFn::handler_ref("onPresence", move |data: &Value| {
        seen.fetch_add(1, Ordering::Relaxed);
        println!("[presence] {data}");
    });

    // Subscribe and announce ourselves in one deferred step.
    let handler = on_presence.clone();
    let join = Deferred::new("join", move |dispatch| {
        dispatch.dispatch(intents::subscribe("presence", Some(handler.clone())).into())?;
        dispatch.dispatch(intents::emit("presence", json!({"user": "ada", "online": true})).into())
    });
    store.dispatch(join.into())?;

    channel.deliver("presence", &json!({"user": "grace", "online": true}));
    store.dispatch(intents::unsubscribe("presence", on_presence).into())?;
    channel.deliver("presence", &json!({"user": "grace", "online": false}));

    println!("handler calls: {}", hits.load(Ordering::Relaxed));
    for record in store.state() {
        println!("{record}");
    }
    Ok(())
}
