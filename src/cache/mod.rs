//! Cache Module
//!
//! Read-through caching over a pluggable store: an in-process TTL/LRU store
//! or a shared Redis server.

mod entry;
mod lru;
mod read_through;
mod redis;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use read_through::{FetchError, ReadThroughCache};
pub use self::redis::RedisBackend;
pub use stats::{CacheStats, StatsRecorder};
pub use store::{CacheStore, MemoryBackend};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Cache Backend ==
/// Key-addressed store with per-entry expiry.
///
/// Each call is a single atomic get or set; the read-through layer never
/// holds anything across calls.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the live value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Creates or overwrites the entry for `key`, expiring `ttl` from now.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;
}
