//! # Store observer trait.
//!
//! Provides [`Observe`] an extension point for devtools, logging or metrics
//! that want to see every action the store applies, provenance records
//! included.
//!
//! Each observer gets:
//! - **Dedicated worker task** (runs independently)
//! - **Per-observer bounded queue** (capacity via [`Observe::queue_capacity`])
//! - **Panic isolation** (panics are caught and reported as `StoreEventKind::ObserverPanicked`)
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use async_trait::async_trait;
//! use sockbridge::{Observe, StoreEvent};
//!
//! #[derive(Default)]
//! struct Emits(AtomicU64);
//!
//! #[async_trait]
//! impl Observe for Emits {
//!     async fn on_event(&self, ev: &StoreEvent) {
//!         if ev.action_type.as_deref().is_some_and(|t| t.starts_with("EMIT: ")) {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "emits" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::StoreEvent;

/// Store observer.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Slow processing affects only this observer's queue.
#[async_trait]
pub trait Observe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated worker task, in FIFO order per observer.
    async fn on_event(&self, event: &StoreEvent);

    /// Returns the observer name used in logs and overflow/panic events.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this observer.
    ///
    /// The runtime clamps capacity to a minimum of 1. Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
