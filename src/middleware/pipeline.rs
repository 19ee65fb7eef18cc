//! # Pipeline seams.
//!
//! [`Dispatch`] is the capability to push an action into the pipeline from the
//! top; [`Middleware`] is one interceptor stage; [`Next`] continues with the
//! remaining stages.
//!
//! ```text
//! dispatch(action) ──► mw[0].process(action, dispatch, next)
//!                          └─► next(action) ──► mw[1].process(...) ──► ... ──► reducer
//! ```

use std::sync::Arc;

use crate::actions::{Action, Outcome};
use crate::error::BridgeError;

/// Capability to dispatch an action from the top of a pipeline.
///
/// Dispatch is re-entrant: a middleware may dispatch while processing.
pub trait Dispatch: Send + Sync + 'static {
    /// Routes `action` through the whole pipeline.
    fn dispatch(&self, action: Action) -> Result<Outcome, BridgeError>;
}

/// Shared dispatch capability.
pub type DispatchRef = Arc<dyn Dispatch>;

/// Continuation running the remaining pipeline stages.
pub type Next<'a> = &'a dyn Fn(Action) -> Result<Outcome, BridgeError>;

/// One interceptor stage in a dispatch pipeline.
///
/// Implementations either handle the action themselves or pass it to `next`
/// and return its result unchanged.
pub trait Middleware: Send + Sync + 'static {
    /// Processes one dispatched action.
    fn process(
        &self,
        action: Action,
        dispatch: &DispatchRef,
        next: Next<'_>,
    ) -> Result<Outcome, BridgeError>;

    /// Returns the middleware name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
