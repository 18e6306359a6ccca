//! Name-keyed subscriber registry shared by stores and queues.

use crate::error::{Result, StoreError};
use crossbeam_channel::{bounded, Sender};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::types::{Subscription, SubscriptionConfig};

/// Internal subscriber state.
struct Subscriber<N> {
    /// Cleared by the subscriber; read by the broadcaster.
    connected: Arc<AtomicBool>,
    /// Only sender for the subscriber's channel. Dropping it closes the channel.
    sender: Sender<N>,
}

/// Outcome of one broadcast pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct BroadcastSummary {
    /// Subscribers that received the signal.
    pub delivered: usize,
    /// Disconnected subscribers whose channels were closed and entries removed.
    pub reaped: usize,
}

/// Registry of named subscribers with lazy cleanup.
///
/// Disconnection only flips a flag. Channels are closed exclusively by
/// [`broadcast`](Self::broadcast), under the registry lock, so a send can
/// never race a close.
pub(crate) struct SubscriberRegistry<N> {
    subscribers: Mutex<HashMap<String, Subscriber<N>>>,
    config: SubscriptionConfig,
}

impl<N: Clone> SubscriberRegistry<N> {
    /// Create an empty registry.
    pub(crate) fn new(config: SubscriptionConfig) -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Register a subscriber under `name`.
    ///
    /// Fails with [`StoreError::AlreadySubscribed`] while an entry with that
    /// name exists, including a disconnected one not yet reaped.
    pub(crate) fn subscribe(&self, name: &str) -> Result<Subscription<N>> {
        let mut subs = self.subscribers.lock();
        if subs.contains_key(name) {
            tracing::debug!(subscriber = %name, "subscribe rejected: name in use");
            return Err(StoreError::AlreadySubscribed(name.to_string()));
        }

        let buffer_size = self.config.effective_buffer_size();
        let (sender, receiver) = bounded(buffer_size);
        let connected = Arc::new(AtomicBool::new(true));

        subs.insert(
            name.to_string(),
            Subscriber {
                connected: Arc::clone(&connected),
                sender,
            },
        );
        tracing::debug!(subscriber = %name, buffer_size, "subscribed");

        Ok(Subscription::new(name.to_string(), receiver, connected))
    }

    /// Mark the entry owned by `subscription` as disconnected.
    ///
    /// A handle issued by a different registry is ignored. Takes the registry
    /// lock, so it waits behind an in-flight broadcast; a subscriber with a
    /// full buffer should call [`Subscription::unsubscribe`] directly.
    pub(crate) fn unsubscribe(&self, subscription: &Subscription<N>) {
        let subs = self.subscribers.lock();
        if let Some(sub) = subs.get(subscription.name()) {
            if subscription.shares_flag(&sub.connected) {
                subscription.unsubscribe();
            }
        }
    }

    /// Deliver `signal` to every connected subscriber and reap the rest.
    ///
    /// Blocks while a connected subscriber's buffer is full. A subscriber that
    /// neither drains nor disconnects stalls the caller.
    pub(crate) fn broadcast(&self, signal: N) -> BroadcastSummary {
        let mut subs = self.subscribers.lock();
        let mut retained = HashMap::with_capacity(subs.len());
        let mut summary = BroadcastSummary::default();

        for (name, sub) in subs.drain() {
            if !sub.connected.load(Ordering::Acquire) {
                tracing::debug!(subscriber = %name, "reaping disconnected subscriber");
                summary.reaped += 1;
                continue;
            }
            // Fails only when the handle was dropped without unsubscribing.
            if sub.sender.send(signal.clone()).is_err() {
                tracing::debug!(subscriber = %name, "reaping dropped subscriber");
                summary.reaped += 1;
                continue;
            }
            summary.delivered += 1;
            retained.insert(name, sub);
        }

        *subs = retained;
        tracing::trace!(
            delivered = summary.delivered,
            reaped = summary.reaped,
            "broadcast"
        );
        summary
    }

    /// Number of registered entries, including those pending reap.
    pub(crate) fn len(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl<N: Clone> Default for SubscriberRegistry<N> {
    fn default() -> Self {
        Self::new(SubscriptionConfig::default())
    }
}
