//! # Function-backed handler (`HandlerFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(&Value)` together with a name.
//! If the closure needs shared state, capture an `Arc<...>` explicitly.
//!
//! ## Example
//! ```rust
//! use serde_json::{json, Value};
//! use sockbridge::{HandlerFn, HandlerRef};
//!
//! let h: HandlerRef = HandlerFn::handler_ref("onMessage", |data: &Value| {
//!     println!("message: {data}");
//! });
//!
//! assert_eq!(h.name(), "onMessage");
//! h.call(&json!({"text": "hi"}));
//! ```

use std::borrow::Cow;

use serde_json::Value;

use super::{Handler, HandlerRef};

/// Function-backed handler implementation.
#[derive(Debug)]
pub struct HandlerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::handler_ref`] when you immediately need a [`HandlerRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> HandlerFn<F>
where
    F: Fn(&Value) + Send + Sync + 'static,
{
    /// Creates the handler and returns it as a shared [`HandlerRef`].
    pub fn handler_ref(name: impl Into<Cow<'static, str>>, f: F) -> HandlerRef {
        HandlerRef::new(Self::new(name, f))
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&Value) + Send + Sync + 'static,
{
    fn call(&self, data: &Value) {
        (self.f)(data)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_calls_closure_with_data() {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let h = HandlerFn::handler_ref("counter", move |data: &Value| {
            assert_eq!(data, &json!(7));
            seen.fetch_add(1, Ordering::SeqCst);
        });

        h.call(&json!(7));
        h.call(&json!(7));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
