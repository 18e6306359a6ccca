//! Reducer-driven state store.

use crate::error::Result;
use crate::subscriptions::{SubscriberRegistry, Subscription, SubscriptionConfig};
use crate::types::{Action, BoxedReducer, Reducer};
use parking_lot::RwLock;

/// Store configuration.
#[derive(Clone, Debug, Default)]
pub struct StoreConfig {
    /// Channel settings for new subscribers.
    pub subscription: SubscriptionConfig,
}

/// Single-owner state container.
///
/// Holds one authoritative state value, changed only by [`dispatch`](Self::dispatch).
/// Every successful dispatch notifies subscribers with a unit signal; they call
/// [`get_state`](Self::get_state) to see the new value.
pub struct Store<S, P> {
    /// Current state. Writers hold the lock through the broadcast.
    state: RwLock<S>,

    reducer: BoxedReducer<S, P>,

    subscribers: SubscriberRegistry<()>,
}

impl<S, P> Store<S, P> {
    /// Create a store with default configuration.
    pub fn new<R>(initial_state: S, reducer: R) -> Self
    where
        R: Reducer<S, P> + 'static,
    {
        Self::with_config(initial_state, reducer, StoreConfig::default())
    }

    /// Create a store with explicit configuration.
    pub fn with_config<R>(initial_state: S, reducer: R, config: StoreConfig) -> Self
    where
        R: Reducer<S, P> + 'static,
    {
        Self {
            state: RwLock::new(initial_state),
            reducer: Box::new(reducer),
            subscribers: SubscriberRegistry::new(config.subscription),
        }
    }

    /// Read the current state under the shared lock.
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.read())
    }

    /// Apply `action` through the reducer.
    ///
    /// On error the state is untouched, nobody is notified, and the reducer's
    /// error is returned as-is. On success the state is replaced and all
    /// connected subscribers are signalled before this returns.
    pub fn dispatch(&self, action: Action<P>) -> Result<()> {
        let mut state = self.state.write();

        let next = match self.reducer.reduce(&state, &action) {
            Ok(next) => next,
            Err(e) => {
                tracing::debug!(action = %action.action_type, error = %e, "dispatch rejected");
                return Err(e);
            }
        };
        *state = next;

        // Broadcast before releasing the state lock so signals follow dispatch order.
        self.subscribers.broadcast(());
        Ok(())
    }

    /// Register a subscriber for change signals.
    pub fn subscribe(&self, name: &str) -> Result<Subscription<()>> {
        self.subscribers.subscribe(name)
    }

    /// Disconnect `subscription`. Its channel closes on the next dispatch.
    pub fn unsubscribe(&self, subscription: &Subscription<()>) {
        self.subscribers.unsubscribe(subscription);
    }

    /// Number of subscribers, including disconnected ones not yet reaped.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<S: Clone, P> Store<S, P> {
    /// Snapshot of the current state.
    pub fn get_state(&self) -> S {
        self.state.read().clone()
    }
}
