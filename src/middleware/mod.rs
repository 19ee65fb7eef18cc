//! # Dispatch pipeline seams and the bridging middleware.
//!
//! - [`Dispatch`], [`DispatchRef`] - capability to dispatch from the top
//! - [`Middleware`], [`Next`] - one interceptor stage and its continuation
//! - [`SocketMiddleware`] - translates intents into channel operations

mod pipeline;
mod socket;

pub use pipeline::{Dispatch, DispatchRef, Middleware, Next};
pub use socket::SocketMiddleware;
