//! Error types for stores and queues.

use thiserror::Error;

/// Main error type for store and queue operations.
///
/// The `Invalid*` reducer variants are never raised by the containers
/// themselves; a reducer returns them and `dispatch` hands them back as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Already subscribed: {0}")]
    AlreadySubscribed(String),

    #[error("Invalid payload type")]
    InvalidPayloadType,

    #[error("Invalid state type")]
    InvalidStateType,

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for store and queue operations.
pub type Result<T> = std::result::Result<T, StoreError>;
