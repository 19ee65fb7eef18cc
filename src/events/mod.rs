//! Store events: types and broadcast bus.
//!
//! ## Contents
//! - [`StoreEventKind`], [`StoreEvent`] event classification and metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Store::dispatch` (one `Reduced` per applied action),
//!   `ObserverSet` workers (overflow/panic).
//! - **Consumers**: the store's observer listener (fans out to `ObserverSet`)
//!   and any receiver obtained through `Store::events()`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{StoreEvent, StoreEventKind};
