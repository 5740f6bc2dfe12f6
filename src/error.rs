//! Error types for the cache stores
//!
//! Provides unified store error handling using thiserror. Upstream failures
//! have their own type in [`crate::upstream`], and neither ever reaches a
//! response body: both are folded into an [`crate::outcome::Outcome`].

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache store operations.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key rejected by the store
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Value exceeds the store's size limit
    #[error("Value too large: {0}")]
    ValueTooLarge(String),

    /// Redis command or connection failure
    #[error("Redis error: {0}")]
    Redis(String),

    /// Cached payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        Self::Redis(err.to_string())
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache store operations.
pub type Result<T> = std::result::Result<T, CacheError>;
