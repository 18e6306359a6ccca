//! Core types: actions and the reducer seam.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A tagged request to transition state.
///
/// The store does not inspect either field; discriminating on
/// `action_type` and validating `payload` is the reducer's job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action<P> {
    #[serde(rename = "type")]
    pub action_type: String,
    pub payload: P,
}

impl<P> Action<P> {
    pub fn new(action_type: impl Into<String>, payload: P) -> Self {
        Self {
            action_type: action_type.into(),
            payload,
        }
    }
}

/// A pure transition function from the current state and an action to the next state.
///
/// Implementations must not rely on interior mutability of `state`: the store
/// replaces its value wholesale with whatever is returned, and discards the
/// result entirely on error.
pub trait Reducer<S, P>: Send + Sync {
    fn reduce(&self, state: &S, action: &Action<P>) -> Result<S>;
}

impl<S, P, F> Reducer<S, P> for F
where
    F: Fn(&S, &Action<P>) -> Result<S> + Send + Sync,
{
    fn reduce(&self, state: &S, action: &Action<P>) -> Result<S> {
        self(state, action)
    }
}

/// Type-erased reducer, as held by a [`Store`](crate::Store).
pub type BoxedReducer<S, P> = Box<dyn Reducer<S, P>>;
