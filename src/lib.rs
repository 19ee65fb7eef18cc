//! # sockbridge
//!
//! **Sockbridge** is a Redux-style middleware that bridges a store's dispatch
//! pipeline to a socket-like duplex event channel.
//!
//! Application code dispatches three channel-control intents (`EMIT`,
//! `SUBSCRIBE`, `UNSUBSCRIBE`). The [`SocketMiddleware`] turns them into
//! channel operations, records a provenance [`Notification`] for each one
//! *before* touching the channel, and by default re-dispatches inbound data as
//! `RECEIVE: <event>` actions so reducers can consume it like any other action.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   intents::emit / subscribe / unsubscribe
//!                 │
//!                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Store (dispatch pipeline)                                        │
//! │   mw[0] ─► mw[1] ─► ... ─► SocketMiddleware ─► ... ─► Reducer     │
//! └──────┬──────────────────────────────┬─────────────────────────▲───┘
//!        │ provenance (dispatched first)│ channel ops             │
//!        │ EMIT / SUBSCRIBE / UNSUB     ▼                         │
//!        │                ┌───────────────────────────┐           │
//!        │                │ Channel (send / add /     │           │
//!        │                │          remove listener) │           │
//!        │                └─────────────┬─────────────┘           │
//!        │                              │ inbound event           │
//!        │                              ▼                         │
//!        │                       ReceiveHandler ── RECEIVE: <ev> ─┘
//!        ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                    Bus (broadcast StoreEvent)                     │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                          observer listener ──► ObserverSet ──► LogWriter, ...
//! ```
//!
//! ### Intent lifecycle
//! ```text
//! EMIT(event, payload)
//!   ├─► dispatch { type: "EMIT: event", action: "<label> EMIT", data }
//!   └─► channel.send(event, payload)                      ─► Outcome::Emitted
//!
//! SUBSCRIBE(event, handler?)
//!   ├─► dispatch { type: "SUBSCRIBE: event", handle: "Custom: <name>" | null }
//!   ├─► effective = handler or ReceiveHandler(event)
//!   └─► channel.add_listener(event, effective)            ─► Outcome::Subscribed(Subscription)
//!
//! UNSUBSCRIBE(event, handler)
//!   ├─► dispatch { type: "UNSUBSCRIBE event" }
//!   ├─► no callable handler ─► Err(InvalidUnsubscribe), channel untouched
//!   └─► channel.remove_listener(event, handler)           ─► Outcome::Unsubscribed
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                          |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Intents**       | Pure constructors for channel-control actions.               | [`intents`], [`Intent`]                     |
//! | **Middleware**    | Bridges intents to the channel with provenance records.      | [`SocketMiddleware`], [`Middleware`]        |
//! | **Channel**       | Duplex contract plus an in-process loopback.                 | [`Channel`], [`LocalChannel`]               |
//! | **Handlers**      | Inbound callbacks with identity equality.                    | [`HandlerRef`], [`HandlerFn`], [`ReceiveHandler`] |
//! | **Store**         | Minimal state container driving the middleware chain.        | [`Store`], [`Reducer`]                      |
//! | **Observer API**  | Hook into applied actions (logging, devtools).               | [`Observe`]                                 |
//! | **Errors**        | Typed errors for dispatch and channel failures.              | [`BridgeError`], [`ChannelError`]           |
//! | **Configuration** | Centralize runtime settings.                                 | [`Config`]                                  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] observer _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use sockbridge::{intents, Action, Config, HandlerFn, LocalChannel, SocketMiddleware, Store};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config::default();
//!     let channel = Arc::new(LocalChannel::new(&cfg));
//!
//!     // Observers (optional)
//!     #[cfg(feature = "logging")]
//!     let obs: Vec<Arc<dyn sockbridge::Observe>> = vec![Arc::new(sockbridge::LogWriter::default())];
//!     #[cfg(not(feature = "logging"))]
//!     let obs: Vec<Arc<dyn sockbridge::Observe>> = Vec::new();
//!
//!     let store = Store::builder(Vec::<String>::new(), |log: &mut Vec<String>, a: &Action| {
//!         log.push(a.type_str());
//!     })
//!     .with_config(cfg.clone())
//!     .with_middleware(Arc::new(SocketMiddleware::new(channel.clone(), &cfg)))
//!     .with_observers(obs)
//!     .build();
//!
//!     // Custom handler: inbound data goes to the closure, not the store.
//!     let printer = HandlerFn::handler_ref("printer", |data| println!("got {data}"));
//!     let sub = store
//!         .dispatch(intents::subscribe("chat:message", Some(printer)).into())?
//!         .into_subscription()
//!         .ok_or("expected a subscription")?;
//!
//!     store.dispatch(intents::emit("chat:message", json!({"text": "hi"})).into())?;
//!     channel.deliver("chat:message", &json!({"text": "hello back"}));
//!
//!     store.dispatch(sub.unsubscribe_intent().into())?;
//!     store.shutdown().await;
//!     Ok(())
//! }
//! ```
mod actions;
mod channel;
mod config;
mod error;
mod events;
mod handlers;
mod middleware;
mod observers;
mod store;

pub mod intents;

#[cfg(test)]
mod testing;

// ---- Public re-exports ----

pub use actions::{Action, Deferred, Notification, Outcome, Subscription};
pub use channel::{Channel, Frame, LocalChannel};
pub use config::Config;
pub use error::{BridgeError, ChannelError};
pub use events::{Bus, StoreEvent, StoreEventKind};
pub use handlers::{Handler, HandlerFn, HandlerRef, ReceiveHandler};
pub use intents::{Intent, IntentKind};
pub use middleware::{Dispatch, DispatchRef, Middleware, Next, SocketMiddleware};
pub use observers::{Observe, ObserverSet};
pub use store::{Reducer, Store, StoreBuilder};

// Optional: expose a simple built-in logger observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
