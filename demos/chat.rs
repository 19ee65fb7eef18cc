//! # Demo: chat
//!
//! A tiny chat client wired to an in-process loopback channel.
//!
//! Shows how to:
//! - Install [`SocketMiddleware`] in a [`Store`].
//! - Subscribe with the default handler so inbound messages become
//!   `RECEIVE: <event>` actions handled by the reducer.
//! - Feed inbound frames through [`LocalChannel::spawn_inbound`].
//! - Unsubscribe with the returned [`Subscription`](sockbridge::Subscription).
//!
//! ## Flow
//! ```text
//! dispatch(SUBSCRIBE chat:message)
//!     ├─► reducer sees "SUBSCRIBE: chat:message"
//!     └─► channel.add_listener(ReceiveHandler)
//! server frame ──► inbound pump ──► ReceiveHandler ──► dispatch(RECEIVE: chat:message)
//! dispatch(EMIT chat:message)
//!     ├─► reducer sees "EMIT: chat:message"
//!     └─► channel.send() ──► outbound frames
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example chat
//! ```

use std::{sync::Arc, time::Duration};

use serde_json::{json, Value};
use sockbridge::{
    intents, Action, Channel, Config, Frame, LocalChannel, LogWriter, Notification, Observe,
    SocketMiddleware, Store,
};
use tracing_subscriber::EnvFilter;

/// Chat state built purely from actions.
#[derive(Debug, Clone, Default)]
struct Chat {
    subscribed: bool,
    sent: Vec<Value>,
    inbox: Vec<Value>,
}

fn reduce(chat: &mut Chat, action: &Action) {
    match action.as_notification() {
        Some(Notification::Subscribe { .. }) => chat.subscribed = true,
        Some(Notification::Unsubscribe { .. }) => chat.subscribed = false,
        Some(Notification::Emit { data, .. }) => chat.sent.push(data.clone()),
        Some(Notification::Receive { data, .. }) => chat.inbox.push(data.clone()),
        None => {}
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = Config::default();
    let channel = Arc::new(LocalChannel::new(&cfg));

    let store = Store::builder(Chat::default(), reduce)
        .with_config(cfg.clone())
        .with_middleware(Arc::new(SocketMiddleware::new(channel.clone(), &cfg)))
        .with_observers(vec![Arc::new(LogWriter::new()) as Arc<dyn Observe>])
        .build();

    // Echo "server": every outbound frame comes back as an inbound one.
    let (tx, rx) = tokio::sync::mpsc::channel::<Frame>(16);
    let pump = channel.spawn_inbound(rx);
    let mut outbound = channel.outbound();
    let echo = tokio::spawn(async move {
        while let Ok(frame) = outbound.recv().await {
            let reply = Frame::new(frame.event, json!({"echo": frame.payload}));
            if tx.send(reply).await.is_err() {
                break;
            }
        }
    });

    let sub = store
        .dispatch(intents::subscribe("chat:message", None).into())?
        .into_subscription()
        .ok_or_else(|| anyhow::anyhow!("subscribe returned no subscription"))?;

    for text in ["hello", "anyone here?"] {
        store.dispatch(intents::emit("chat:message", json!({ "text": text })).into())?;
    }
    tokio::time::sleep(Duration::from_millis(100)).await;

    store.dispatch(sub.unsubscribe_intent().into())?;

    let chat = store.state();
    println!("subscribed: {}", chat.subscribed);
    println!("sent:       {:?}", chat.sent);
    println!("inbox:      {:?}", chat.inbox);

    channel.close();
    echo.abort();
    let _ = pump.await;
    store.shutdown().await;
    Ok(())
}
