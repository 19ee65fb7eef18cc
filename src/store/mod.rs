//! # Store: state, reducer and middleware chain.
//!
//! - [`Store`] - owns the state and routes dispatches through middleware
//! - [`StoreBuilder`] - configures middleware, observers and [`Config`](crate::Config)
//! - [`Reducer`] - pure state update, implemented for closures

mod builder;
mod reducer;
mod runtime;

pub use builder::StoreBuilder;
pub use reducer::Reducer;
pub use runtime::Store;
