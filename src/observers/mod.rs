//! # Store observers.
//!
//! This module provides the [`Observe`] trait and the fan-out machinery that
//! delivers [`StoreEvent`](crate::StoreEvent)s published on the store's bus.
//!
//! ## Architecture
//! ```text
//! Store::dispatch ── publish(StoreEvent) ──► Bus ──► observer listener ──► ObserverSet
//!                                                                  ┌────────┼────────┐
//!                                                                  ▼        ▼        ▼
//!                                                              LogWriter devtools  custom
//! ```

#[cfg(feature = "logging")]
mod log;
mod observer;
mod set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use observer::Observe;
pub use set::ObserverSet;
