//! # Channel listener callbacks.
//!
//! - [`Handler`] - trait for unary inbound-event callbacks
//! - [`HandlerRef`] - shared handle with identity equality
//! - [`HandlerFn`] - closure-backed handler
//! - [`ReceiveHandler`] - default handler that re-dispatches inbound data

mod handler;
mod handler_fn;
mod receive;

pub use handler::{Handler, HandlerRef};
pub use handler_fn::HandlerFn;
pub use receive::ReceiveHandler;
