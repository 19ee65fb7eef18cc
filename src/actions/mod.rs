//! # Values flowing through the dispatch pipeline.
//!
//! - [`Action`] - anything passed to `dispatch`
//! - [`Deferred`] - callable action run with the dispatch capability
//! - [`Notification`] - provenance and receive records
//! - [`Outcome`], [`Subscription`] - dispatch results

mod action;
mod notification;
mod outcome;

pub use action::{Action, Deferred};
pub use notification::Notification;
pub use outcome::{Outcome, Subscription};
