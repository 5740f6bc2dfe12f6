//! Read-Through Cache
//!
//! Cache-aside orchestration: serve a fresh stored value when there is one,
//! otherwise run the producer once and store what it returns.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::{CacheBackend, CacheStats, StatsRecorder};
use crate::error::CacheError;

// == Fetch Error ==
/// Failure of a read-through fetch.
#[derive(Error, Debug)]
pub enum FetchError<E> {
    /// The producer failed; carried through unmodified
    #[error("{0}")]
    Producer(E),

    /// The store could not be read
    #[error("cache store unavailable: {0}")]
    Store(#[from] CacheError),
}

// == Read-Through Cache ==
/// Read-through cache over any [`CacheBackend`].
///
/// Cloning is cheap and clones share both the backend and the counters.
#[derive(Clone)]
pub struct ReadThroughCache {
    backend: Arc<dyn CacheBackend>,
    stats: Arc<StatsRecorder>,
}

impl ReadThroughCache {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend,
            stats: Arc::new(StatsRecorder::new()),
        }
    }

    // == Fetch ==
    /// Returns the value cached under `key`, or produces, stores and returns it.
    ///
    /// `producer` is invoked at most once, and only on a miss. Its failure is
    /// returned as [`FetchError::Producer`] and nothing is written, so a failed
    /// lookup never hides a later successful one.
    pub async fn fetch<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<T, FetchError<E>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(raw) = self.backend.get(key).await? {
            match serde_json::from_str(&raw) {
                Ok(value) => {
                    self.stats.record_hit();
                    debug!("Cache hit for {}", key);
                    return Ok(value);
                }
                Err(e) => warn!("Discarding undecodable cache entry for {}: {}", key, e),
            }
        }

        self.stats.record_miss();
        debug!("Cache miss for {}", key);

        let value = match producer().await {
            Ok(value) => value,
            Err(e) => {
                self.stats.record_upstream_failure();
                return Err(FetchError::Producer(e));
            }
        };

        // The lookup already succeeded; a failed write only costs a future miss
        match self.store(key, &value, ttl).await {
            Ok(()) => self.stats.record_store(),
            Err(e) => warn!("Failed to cache value for {}: {}", key, e),
        }

        Ok(value)
    }

    // == Store ==
    /// Encodes `value` and writes it under `key`.
    async fn store<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, raw, ttl).await
    }

    // == Stats ==
    /// Returns a snapshot of the hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}
