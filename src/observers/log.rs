//! # LogWriter: store event logger
//!
//! A minimal observer that writes every [`StoreEvent`] through `tracing`.
//! Provenance records make the channel traffic visible next to ordinary
//! application actions.
//!
//! ## Example output
//! ```text
//! INFO sockbridge: reduced seq=3 action="SUBSCRIBE: chat:message" data={"event":"chat:message","handle":null,...}
//! INFO sockbridge: reduced seq=4 action="EMIT: chat:message" data={"action":"socket EMIT",...}
//! INFO sockbridge: reduced seq=9 action="RECEIVE: chat:message" data={"data":{"text":"hi"},...}
//! WARN sockbridge: observer overflow observer="devtools" reason="full"
//! ```

use async_trait::async_trait;
use tracing::{info, warn};

use crate::events::{StoreEvent, StoreEventKind};
use crate::observers::Observe;

/// Event writer observer.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Observe for LogWriter {
    async fn on_event(&self, e: &StoreEvent) {
        match e.kind {
            StoreEventKind::Reduced => {
                let data = e.data.as_ref().map(|d| d.to_string()).unwrap_or_default();
                info!(
                    target: "sockbridge",
                    seq = e.seq,
                    action = e.action_type.as_deref().unwrap_or("unknown"),
                    data = %data,
                    "reduced"
                );
            }
            StoreEventKind::ObserverOverflow => {
                warn!(
                    target: "sockbridge",
                    observer = e.observer.as_deref().unwrap_or("unknown"),
                    reason = e.reason.as_deref().unwrap_or("unknown"),
                    "observer overflow"
                );
            }
            StoreEventKind::ObserverPanicked => {
                warn!(
                    target: "sockbridge",
                    observer = e.observer.as_deref().unwrap_or("unknown"),
                    info = e.reason.as_deref().unwrap_or("unknown"),
                    "observer panicked"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
