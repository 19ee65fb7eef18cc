//! # Listener callbacks and their identity.
//!
//! A [`Handler`] is the unary callback a channel invokes with inbound event data.
//! [`HandlerRef`] is the shared handle passed around the bridge; two handles are
//! equal only when they point at the **same** callback, which is what listener
//! removal relies on.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// # Unary callback for inbound channel events.
///
/// # Example
/// ```
/// use serde_json::{json, Value};
/// use sockbridge::{Handler, HandlerRef};
///
/// struct Printer;
///
/// impl Handler for Printer {
///     fn call(&self, data: &Value) {
///         println!("got {data}");
///     }
///
///     fn name(&self) -> &str { "printer" }
/// }
///
/// let h = HandlerRef::new(Printer);
/// h.call(&json!({"text": "hi"}));
/// assert_eq!(h.name(), "printer");
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Handles one inbound payload.
    ///
    /// Invoked from the channel's event loop; must not block.
    fn call(&self, data: &Value);

    /// Returns a human-readable name used in provenance records and logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared reference to a [`Handler`].
///
/// Cloning is cheap. Equality is pointer identity, never structural:
/// two handlers wrapping identical closures are still different listeners.
#[derive(Clone)]
pub struct HandlerRef(Arc<dyn Handler>);

impl HandlerRef {
    /// Wraps a handler into a shared reference.
    pub fn new(handler: impl Handler) -> Self {
        Self(Arc::new(handler))
    }

    /// Wraps an already shared handler.
    pub fn from_arc(handler: Arc<dyn Handler>) -> Self {
        Self(handler)
    }

    /// Invokes the underlying callback.
    #[inline]
    pub fn call(&self, data: &Value) {
        self.0.call(data)
    }

    /// Returns the handler name.
    #[inline]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// True if both references point at the same callback.
    #[inline]
    pub fn same(&self, other: &HandlerRef) -> bool {
        // Compare data pointers only; vtable pointers are not unique.
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const (),
            Arc::as_ptr(&other.0) as *const (),
        )
    }
}

impl PartialEq for HandlerRef {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for HandlerRef {}

impl fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerRef").field(&self.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerFn;

    #[test]
    fn test_clone_is_same() {
        let h = HandlerFn::handler_ref("a", |_: &Value| {});
        let c = h.clone();
        assert!(h.same(&c));
        assert_eq!(h, c);
    }

    #[test]
    fn test_identical_closures_are_distinct() {
        let a = HandlerFn::handler_ref("same-name", |_: &Value| {});
        let b = HandlerFn::handler_ref("same-name", |_: &Value| {});
        assert_ne!(a, b);
    }

    #[test]
    fn test_debug_shows_name() {
        let h = HandlerFn::handler_ref("onMessage", |_: &Value| {});
        assert_eq!(format!("{h:?}"), "HandlerRef(\"onMessage\")");
    }
}
