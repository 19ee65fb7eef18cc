//! # Action vocabulary.
//!
//! Pure constructors for the three channel-control intents. Nothing here has
//! side effects; validation happens when the middleware processes the intent.
//!
//! - [`emit`] - send an event with a payload
//! - [`subscribe`] - listen for an event (custom or default handler)
//! - [`unsubscribe`] - stop listening with the handler returned by `subscribe`

mod intent;

pub use intent::{emit, subscribe, unsubscribe, Intent, IntentKind};
