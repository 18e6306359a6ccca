//! Subscription system for change notifications.
//!
//! Both [`Store`](crate::Store) and [`Queue`](crate::Queue) notify their
//! subscribers through a shared registry:
//! - Each subscriber registers under a unique name and gets a bounded channel
//! - Every successful mutation broadcasts a signal to connected subscribers
//! - Unsubscribing only marks the entry; the channel is closed and the entry
//!   removed on the next broadcast
//!
//! Signals carry no guarantee of currency. Re-read the container after
//! receiving one.
//!
//! # Example
//!
//! ```ignore
//! let sub = store.subscribe("renderer")?;
//!
//! while sub.recv().is_ok() {
//!     render(&store.get_state());
//! }
//! // Channel closed: we were unsubscribed.
//! ```

mod registry;
mod types;

pub(crate) use registry::SubscriberRegistry;
pub use types::{Subscription, SubscriptionConfig, MIN_BUFFER_SIZE};
