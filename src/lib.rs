//! # gux
//!
//! A reducer-driven state store and a bounded signaling queue, both with
//! channel-based change subscriptions.
//!
//! ## Core Concepts
//!
//! - **Store**: One state value, replaced by a pure reducer on each dispatch
//! - **Queue**: Fixed-capacity FIFO with drop-oldest eviction
//! - **Subscriptions**: Named subscribers with bounded signal channels, closed
//!   lazily on the broadcast after they unsubscribe
//!
//! ## Example
//!
//! ```ignore
//! use gux::{Action, Store, StoreError};
//!
//! let store = Store::new(0i64, |s: &i64, a: &Action<i64>| match a.action_type.as_str() {
//!     "increment" => Ok(s + a.payload),
//!     other => Err(StoreError::InvalidAction(other.to_string())),
//! });
//!
//! let sub = store.subscribe("logger")?;
//! store.dispatch(Action::new("increment", 1))?;
//!
//! sub.recv()?;
//! assert_eq!(store.get_state(), 1);
//! sub.unsubscribe();
//! ```

pub mod error;
pub mod queue;
pub mod reducers;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use error::{Result, StoreError};
pub use queue::{Queue, QueueConfig};
pub use reducers::{combine_reducers, CombinedReducer};
pub use store::{Store, StoreConfig};
pub use subscriptions::{Subscription, SubscriptionConfig, MIN_BUFFER_SIZE};
pub use types::{Action, BoxedReducer, Reducer};
