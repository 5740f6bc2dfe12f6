//! Cache Store Module
//!
//! In-process storage engine combining HashMap storage with LRU tracking and
//! TTL expiration, plus the [`MemoryBackend`] adapter that shares it between
//! request handlers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheBackend, CacheEntry, LruTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// In-process cache storage with LRU eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            max_entries: max_entries.max(1),
        }
    }

    // == Set ==
    /// Stores a value that expires `ttl` from now.
    ///
    /// An existing entry for the key is overwritten and its expiry reset. If
    /// the store is at capacity, the least recently used entry is evicted.
    pub fn set(&mut self, key: String, value: String, ttl: Duration) -> Result<()> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidKey(format!(
                "Key must be between 1 and {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(CacheError::ValueTooLarge(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted_key) = self.lru.evict_oldest() {
                self.entries.remove(&evicted_key);
                debug!("Evicted least recently used key {}", evicted_key);
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, ttl));
        self.lru.touch(&key);

        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Expired entries are removed on read and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<String> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.lru.remove(key);
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.lru.touch(key);
                Some(value)
            }
            None => None,
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        expired_keys.len()
    }

    // == Length ==
    /// Returns the current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if a live entry exists for the key, without touching LRU order.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }
}

// == Memory Backend ==
/// Shares a [`CacheStore`] between concurrent requests.
///
/// Each trait call takes the write lock for exactly one get or set, so there
/// is never a lock held across an upstream call.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryBackend {
    /// Creates a backend over a fresh store with the given capacity.
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Returns the shared store, used by the cleanup task and by tests.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        self.store.clone()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // Write lock: an expired hit is removed and LRU order changes
        Ok(self.store.write().await.get(key))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        self.store.write().await.set(key.to_string(), value, ttl)
    }
}
