//! # Pure state updates.

use crate::actions::Action;

/// Applies an action to the state. No I/O, no dispatch.
///
/// Called under the store's state lock for every action that reaches the end
/// of the middleware chain, provenance and receive records included.
///
/// Implemented for closures `Fn(&mut S, &Action)`.
pub trait Reducer<S>: Send + Sync + 'static {
    /// Folds `action` into `state`.
    fn reduce(&self, state: &mut S, action: &Action);
}

impl<S, F> Reducer<S> for F
where
    F: Fn(&mut S, &Action) + Send + Sync + 'static,
{
    fn reduce(&self, state: &mut S, action: &Action) {
        self(state, action)
    }
}
