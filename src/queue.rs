//! Bounded FIFO queue that signals its length on every push.

use crate::error::{Result, StoreError};
use crate::subscriptions::{SubscriberRegistry, Subscription, SubscriptionConfig};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Queue configuration.
#[derive(Clone, Debug)]
pub struct QueueConfig {
    /// Maximum number of items held. Must be non-zero.
    pub limit: usize,

    /// Channel settings for new subscribers.
    pub subscription: SubscriptionConfig,
}

impl QueueConfig {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            subscription: SubscriptionConfig::default(),
        }
    }
}

/// Fixed-capacity FIFO with drop-oldest eviction.
///
/// Each push broadcasts the post-push length to subscribers. Pops are silent.
pub struct Queue<T> {
    items: Mutex<VecDeque<T>>,
    limit: usize,
    subscribers: SubscriberRegistry<usize>,
}

impl<T> Queue<T> {
    /// Create a queue holding at most `limit` items.
    pub fn new(limit: usize) -> Result<Self> {
        Self::with_config(QueueConfig::with_limit(limit))
    }

    /// Create a queue from explicit configuration.
    pub fn with_config(config: QueueConfig) -> Result<Self> {
        if config.limit == 0 {
            return Err(StoreError::InvalidConfig(
                "queue limit must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            items: Mutex::new(VecDeque::with_capacity(config.limit)),
            limit: config.limit,
            subscribers: SubscriberRegistry::new(config.subscription),
        })
    }

    /// Remove and return the front item, or `None` when empty.
    pub fn pop(&self) -> Option<T> {
        let item = self.items.lock().pop_front();
        tracing::trace!(hit = item.is_some(), "pop");
        item
    }

    /// Append `item`, evicting the oldest item first if the queue is full,
    /// then signal every connected subscriber with the new length.
    pub fn push(&self, item: T) {
        let mut items = self.items.lock();

        if items.len() >= self.limit {
            items.pop_front();
            tracing::trace!(limit = self.limit, "evicted oldest item");
        }
        items.push_back(item);

        let len = items.len();
        tracing::trace!(len, "push");
        self.subscribers.broadcast(len);
    }

    /// Register a subscriber for length signals.
    pub fn subscribe(&self, name: &str) -> Result<Subscription<usize>> {
        self.subscribers.subscribe(name)
    }

    /// Disconnect `subscription`. Its channel closes on the next push.
    pub fn unsubscribe(&self, subscription: &Subscription<usize>) {
        self.subscribers.unsubscribe(subscription);
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of subscribers, including disconnected ones not yet reaped.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::TryRecvError;

    #[test]
    fn test_zero_limit_rejected() {
        let result = Queue::<u8>::new(0);
        assert!(matches!(result, Err(StoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_fifo_order() {
        let queue = Queue::new(4).unwrap();
        queue.push("a");
        queue.push("b");
        queue.push("c");

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some("a"));
        assert_eq!(queue.pop(), Some("b"));
        assert_eq!(queue.pop(), Some("c"));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drop_oldest() {
        let queue = Queue::new(2).unwrap();
        for i in 1..=5 {
            queue.push(i);
        }

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(4));
        assert_eq!(queue.pop(), Some(5));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_push_signals_length() {
        let queue = Queue::with_config(QueueConfig {
            limit: 2,
            subscription: SubscriptionConfig::with_buffer_size(4),
        })
        .unwrap();
        let sub = queue.subscribe("consumer").unwrap();

        queue.push('x');
        queue.push('y');
        queue.push('z');

        // Length saturates at the limit.
        assert_eq!(sub.try_recv(), Ok(1));
        assert_eq!(sub.try_recv(), Ok(2));
        assert_eq!(sub.try_recv(), Ok(2));
        assert!(matches!(sub.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_pop_is_silent() {
        let queue = Queue::new(3).unwrap();
        queue.push(1);
        let sub = queue.subscribe("consumer").unwrap();

        assert_eq!(queue.pop(), Some(1));
        assert!(matches!(sub.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_unsubscribe_closes_on_next_push() {
        let queue = Queue::new(3).unwrap();
        let sub = queue.subscribe("consumer").unwrap();

        queue.unsubscribe(&sub);
        queue.push(1);

        assert_eq!(queue.subscriber_count(), 0);
        assert!(matches!(sub.try_recv(), Err(TryRecvError::Disconnected)));
        assert_eq!(queue.limit(), 3);
    }
}
