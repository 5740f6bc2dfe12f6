//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cached value and its expiry deadline.
///
/// Timestamps come from tokio's monotonic clock so that expiry can be driven
/// by a paused runtime in tests.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// When the entry stops being served
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches the expiration time,
    /// so a read exactly `ttl` after creation already misses.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_creation() {
        let entry = CacheEntry::new("42.5".to_string(), Duration::from_secs(120));

        assert_eq!(entry.value, "42.5");
        assert_eq!(entry.expires_at - Instant::now(), Duration::from_secs(120));
        assert!(!entry.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expiration() {
        let entry = CacheEntry::new("42.5".to_string(), Duration::from_secs(120));

        tokio::time::advance(Duration::from_secs(119)).await;
        assert!(!entry.is_expired());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(entry.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("test".to_string(), Duration::ZERO);

        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }
}
