//! # Bridge configuration.
//!
//! Provides [`Config`] centralized settings for the store, the bridging
//! middleware and the built-in [`LocalChannel`](crate::LocalChannel).
//!
//! Config is used in three places:
//! 1. **Middleware creation**: `SocketMiddleware::new(channel, &config)`
//! 2. **Channel creation**: `LocalChannel::new(&config)`
//! 3. **Store creation**: `Store::builder(state, reducer).with_config(config)`
//!
//! ## Sentinel values
//! - `outbound_capacity = 0` → no sent-frame history is kept
//! - `bus_capacity = 0` → clamped to 1

use serde::Deserialize;

/// Global configuration for the bridge.
///
/// ## Field semantics
/// - `channel_label`: name shown in EMIT provenance records (`"<label> EMIT"`)
/// - `bus_capacity`: store event bus ring buffer size (min 1)
/// - `outbound_capacity`: frames retained by `LocalChannel::sent` (`0` = none)
///
/// Deserializable so hosts can embed it in their own config files; missing
/// fields take their defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Label identifying the channel in provenance records.
    pub channel_label: String,

    /// Capacity of the store event bus broadcast channel.
    ///
    /// Slow observers that lag behind more than `bus_capacity` events skip
    /// the oldest ones.
    pub bus_capacity: usize,

    /// Number of outgoing frames a [`LocalChannel`](crate::LocalChannel) keeps
    /// for inspection, and the capacity of its outbound broadcast.
    pub outbound_capacity: usize,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the sent-frame history length as an `Option`.
    ///
    /// - `None` → no history
    /// - `Some(n)` → keep the latest `n` frames
    #[inline]
    pub fn outbound_history(&self) -> Option<usize> {
        if self.outbound_capacity == 0 {
            None
        } else {
            Some(self.outbound_capacity)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `channel_label = "socket"`
    /// - `bus_capacity = 1024`
    /// - `outbound_capacity = 256`
    fn default() -> Self {
        Self {
            channel_label: "socket".to_string(),
            bus_capacity: 1024,
            outbound_capacity: 256,
        }
    }
}
