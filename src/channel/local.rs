//! # In-process loopback channel.
//!
//! [`LocalChannel`] implements [`Channel`] without a network: outgoing frames
//! go to a broadcast stream (and a bounded history), inbound frames are fed by
//! the host through [`LocalChannel::deliver`] or an inbound pump task.
//!
//! ## Architecture
//! ```text
//! send(event, payload) ──► history (bounded) + outbound broadcast ──► transport / tests
//!
//! transport ──► mpsc::Receiver<Frame> ──► inbound pump task ──► deliver(event, data)
//!                                          (until closed)          └─► listeners[event]
//! ```
//!
//! ## Rules
//! - Listener mutations are serialized by one mutex.
//! - Listeners are invoked on a snapshot, **without** the lock held, so a
//!   handler may subscribe/unsubscribe or dispatch back into a store.
//! - After [`Channel::close`]: `send`/`add_listener` fail with
//!   [`ChannelError::Closed`], all listeners are dropped and the pump stops.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::{
    sync::{broadcast, mpsc},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::ChannelError;
use crate::handlers::HandlerRef;

use super::{Channel, Frame};

/// Loopback implementation of [`Channel`].
pub struct LocalChannel {
    listeners: Mutex<HashMap<String, Vec<HandlerRef>>>,
    history: Mutex<VecDeque<Frame>>,
    history_cap: Option<usize>,
    outbound: broadcast::Sender<Frame>,
    token: CancellationToken,
}

impl LocalChannel {
    /// Creates an open channel.
    ///
    /// `Config::outbound_capacity` bounds both the history and the outbound
    /// broadcast (min 1 for the broadcast).
    pub fn new(cfg: &Config) -> Self {
        let (outbound, _rx) = broadcast::channel(cfg.outbound_capacity.max(1));
        Self {
            listeners: Mutex::new(HashMap::new()),
            history: Mutex::new(VecDeque::new()),
            history_cap: cfg.outbound_history(),
            outbound,
            token: CancellationToken::new(),
        }
    }

    /// Delivers inbound `data` for `event` to every registered listener.
    ///
    /// Returns how many listeners were invoked.
    pub fn deliver(&self, event: &str, data: &Value) -> usize {
        let snapshot: Vec<HandlerRef> = match lock(&self.listeners).get(event) {
            Some(hs) => hs.clone(),
            None => Vec::new(),
        };
        trace!(event, listeners = snapshot.len(), "deliver");

        for h in &snapshot {
            h.call(data);
        }
        snapshot.len()
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        lock(&self.listeners).get(event).map_or(0, Vec::len)
    }

    /// Frames sent so far, oldest first (bounded by `outbound_capacity`).
    pub fn sent(&self) -> Vec<Frame> {
        lock(&self.history).iter().cloned().collect()
    }

    /// Receiver observing frames sent **after** this call.
    pub fn outbound(&self) -> broadcast::Receiver<Frame> {
        self.outbound.subscribe()
    }

    /// Spawns the inbound pump: delivers every frame received on `rx`.
    ///
    /// Stops when `rx` is closed or the channel is closed.
    pub fn spawn_inbound(self: &Arc<Self>, mut rx: mpsc::Receiver<Frame>) -> JoinHandle<()> {
        let me = Arc::clone(self);
        let token = self.token.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    frame = rx.recv() => match frame {
                        Some(f) => {
                            me.deliver(&f.event, &f.payload);
                        }
                        None => break,
                    },
                }
            }
            debug!("inbound pump stopped");
        })
    }

    fn record(&self, frame: Frame) {
        if let Some(cap) = self.history_cap {
            let mut history = lock(&self.history);
            if history.len() == cap {
                history.pop_front();
            }
            history.push_back(frame.clone());
        }
        // No receivers is fine: the frame is simply not observed.
        let _ = self.outbound.send(frame);
    }
}

impl Default for LocalChannel {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Channel for LocalChannel {
    fn send(&self, event: &str, payload: Value) -> Result<(), ChannelError> {
        if self.is_closed() {
            return Err(ChannelError::Closed);
        }
        debug!(event, "send");
        self.record(Frame::new(event, payload));
        Ok(())
    }

    fn add_listener(&self, event: &str, handler: HandlerRef) -> Result<(), ChannelError> {
        if self.is_closed() {
            return Err(ChannelError::Closed);
        }
        debug!(event, handler = handler.name(), "add listener");
        lock(&self.listeners)
            .entry(event.to_string())
            .or_default()
            .push(handler);
        Ok(())
    }

    fn remove_listener(&self, event: &str, handler: &HandlerRef) -> Result<(), ChannelError> {
        let mut listeners = lock(&self.listeners);
        if let Some(hs) = listeners.get_mut(event) {
            if let Some(pos) = hs.iter().position(|h| h.same(handler)) {
                hs.remove(pos);
                debug!(event, handler = handler.name(), "remove listener");
            }
            if hs.is_empty() {
                listeners.remove(event);
            }
        }
        Ok(())
    }

    fn close(&self) {
        self.token.cancel();
        lock(&self.listeners).clear();
        debug!("channel closed");
    }

    fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerFn;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counter(name: &'static str) -> (HandlerRef, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let h = HandlerFn::handler_ref(name, move |_: &Value| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (h, hits)
    }

    #[test]
    fn test_send_records_history() {
        let ch = LocalChannel::default();
        ch.send("a", json!(1)).unwrap();
        ch.send("b", json!(2)).unwrap();
        assert_eq!(ch.sent(), vec![Frame::new("a", json!(1)), Frame::new("b", json!(2))]);
    }

    #[test]
    fn test_history_is_bounded() {
        let cfg = Config {
            outbound_capacity: 2,
            ..Config::default()
        };
        let ch = LocalChannel::new(&cfg);
        for i in 0..5 {
            ch.send("n", json!(i)).unwrap();
        }
        assert_eq!(ch.sent(), vec![Frame::new("n", json!(3)), Frame::new("n", json!(4))]);
    }

    #[test]
    fn test_no_history_when_capacity_zero() {
        let cfg = Config {
            outbound_capacity: 0,
            ..Config::default()
        };
        let ch = LocalChannel::new(&cfg);
        let mut rx = ch.outbound();
        ch.send("n", json!(1)).unwrap();
        assert!(ch.sent().is_empty());
        assert_eq!(rx.try_recv().unwrap(), Frame::new("n", json!(1)));
    }

    #[test]
    fn test_remove_listener_by_identity_only() {
        let ch = LocalChannel::default();
        let (a, a_hits) = counter("same");
        let (b, b_hits) = counter("same");
        ch.add_listener("e", a.clone()).unwrap();
        ch.add_listener("e", b).unwrap();

        ch.remove_listener("e", &a).unwrap();
        assert_eq!(ch.listener_count("e"), 1);

        assert_eq!(ch.deliver("e", &json!(null)), 1);
        assert_eq!(a_hits.load(Ordering::SeqCst), 0);
        assert_eq!(b_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let ch = LocalChannel::default();
        let (a, _) = counter("a");
        let (b, _) = counter("b");
        ch.add_listener("e", a).unwrap();
        ch.remove_listener("e", &b).unwrap();
        ch.remove_listener("other", &b).unwrap();
        assert_eq!(ch.listener_count("e"), 1);
    }

    #[test]
    fn test_handler_may_reenter_channel() {
        let ch = Arc::new(LocalChannel::default());
        let inner = Arc::clone(&ch);
        let h = HandlerFn::handler_ref("echo", move |data: &Value| {
            inner.send("echo", data.clone()).unwrap();
        });
        ch.add_listener("ping", h).unwrap();

        ch.deliver("ping", &json!("x"));
        assert_eq!(ch.sent(), vec![Frame::new("echo", json!("x"))]);
    }

    #[test]
    fn test_close_rejects_and_drops_listeners() {
        let ch = LocalChannel::default();
        let (a, hits) = counter("a");
        ch.add_listener("e", a.clone()).unwrap();

        ch.close();
        assert!(ch.is_closed());
        assert_eq!(ch.send("e", json!(1)), Err(ChannelError::Closed));
        assert_eq!(ch.add_listener("e", a), Err(ChannelError::Closed));
        assert_eq!(ch.deliver("e", &json!(1)), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_inbound_pump_delivers_until_closed() {
        let ch = Arc::new(LocalChannel::default());
        let (h, hits) = counter("pump");
        ch.add_listener("tick", h).unwrap();

        let (tx, rx) = mpsc::channel(8);
        let pump = ch.spawn_inbound(rx);

        tx.send(Frame::new("tick", json!(1))).await.unwrap();
        tx.send(Frame::new("tick", json!(2))).await.unwrap();
        tx.send(Frame::new("other", json!(3))).await.unwrap();

        tokio::time::timeout(Duration::from_secs(1), async {
            while hits.load(Ordering::SeqCst) < 2 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("frames delivered");

        ch.close();
        tokio::time::timeout(Duration::from_secs(1), pump)
            .await
            .expect("pump stops")
            .unwrap();
    }
}
