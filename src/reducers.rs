//! Reducer composition.

use crate::error::{Result, StoreError};
use crate::types::{Action, BoxedReducer, Reducer};

/// Reducer over `Vec<S>` that runs one child reducer per slot.
///
/// Built by [`combine_reducers`].
pub struct CombinedReducer<S, P> {
    reducers: Vec<BoxedReducer<S, P>>,
}

impl<S, P> CombinedReducer<S, P> {
    /// Number of child reducers, which is also the required state length.
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, P> Reducer<Vec<S>, P> for CombinedReducer<S, P> {
    fn reduce(&self, state: &Vec<S>, action: &Action<P>) -> Result<Vec<S>> {
        if state.len() != self.reducers.len() {
            return Err(StoreError::InvalidStateType);
        }

        // First failing child aborts the whole transition.
        self.reducers
            .iter()
            .zip(state)
            .map(|(reducer, slot)| reducer.reduce(slot, action))
            .collect()
    }
}

/// Combine reducers into one over a state vector.
///
/// Every child sees the same action and its own slot of the state. If any
/// child rejects the action, the combined reducer returns that error and no
/// slot changes.
pub fn combine_reducers<S, P>(reducers: Vec<BoxedReducer<S, P>>) -> CombinedReducer<S, P> {
    CombinedReducer { reducers }
}
