//! Subscription handle and configuration.

use crossbeam_channel::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Smallest signal buffer a subscriber may have.
///
/// With two slots a subscriber that unsubscribes while a broadcast is in
/// flight cannot stall the writer on the final, stale signal.
pub const MIN_BUFFER_SIZE: usize = 2;

/// Configuration for subscriber channels.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Signals buffered per subscriber before the writer blocks.
    /// Values below [`MIN_BUFFER_SIZE`] are raised to it.
    /// Default: 2
    pub buffer_size: usize,
}

impl SubscriptionConfig {
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self { buffer_size }
    }

    /// Buffer size actually used for new channels.
    pub fn effective_buffer_size(&self) -> usize {
        self.buffer_size.max(MIN_BUFFER_SIZE)
    }
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: MIN_BUFFER_SIZE,
        }
    }
}

/// Handle owned by a subscriber.
///
/// Holds the read side of the signal channel and the liveness flag shared
/// with the registry entry. The channel is only ever closed by the owning
/// container, on the first broadcast after [`unsubscribe`](Self::unsubscribe);
/// a closed channel makes `recv` return `Err`.
///
/// Dropping the handle without unsubscribing is also a disconnection: the
/// next broadcast fails to deliver and reaps the entry.
pub struct Subscription<N> {
    name: String,
    receiver: Receiver<N>,
    connected: Arc<AtomicBool>,
}

impl<N> Subscription<N> {
    pub(crate) fn new(name: String, receiver: Receiver<N>, connected: Arc<AtomicBool>) -> Self {
        Self {
            name,
            receiver,
            connected,
        }
    }

    /// Name this subscriber registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Channel to receive signals.
    pub fn receiver(&self) -> &Receiver<N> {
        &self.receiver
    }

    /// Mark this subscriber disconnected. Idempotent and non-blocking.
    ///
    /// Signals already in flight may still arrive; the channel closes on the
    /// container's next broadcast.
    pub fn unsubscribe(&self) {
        if self.connected.swap(false, Ordering::AcqRel) {
            tracing::debug!(subscriber = %self.name, "unsubscribed");
        }
    }

    /// Whether [`unsubscribe`](Self::unsubscribe) has not been called yet.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub(crate) fn shares_flag(&self, flag: &Arc<AtomicBool>) -> bool {
        Arc::ptr_eq(&self.connected, flag)
    }

    /// Receive the next signal (blocking). `Err` once the channel is closed.
    pub fn recv(&self) -> Result<N, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a signal (non-blocking).
    pub fn try_recv(&self) -> Result<N, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<N, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

impl<N> std::fmt::Debug for Subscription<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("name", &self.name)
            .field("connected", &self.is_connected())
            .finish()
    }
}
