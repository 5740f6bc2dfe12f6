//! Balance lookup service
//!
//! Composes extraction, read-through caching, and classification into the
//! per-request flow behind the proxy's fallback route.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::account::AccountNumber;
use crate::cache::{CacheStats, FetchError, ReadThroughCache};
use crate::models::BalanceRecord;
use crate::outcome::{classify, Outcome};
use crate::upstream::{BalanceLookup, UpstreamError};

// == Constants ==
/// Lifetime of a cached balance.
pub const BALANCE_TTL: Duration = Duration::from_secs(120);

// == Balance Service ==
/// Answers balance lookups from cache or upstream.
#[derive(Clone)]
pub struct BalanceService {
    cache: ReadThroughCache,
    upstream: Arc<dyn BalanceLookup>,
}

impl BalanceService {
    pub fn new(cache: ReadThroughCache, upstream: Arc<dyn BalanceLookup>) -> Self {
        Self { cache, upstream }
    }

    /// Resolves the account number in `path` to an [`Outcome`].
    ///
    /// A path without an account number is answered with `NotFound` before
    /// the cache or upstream are touched.
    pub async fn lookup(&self, path: &str) -> Outcome {
        let Some(number) = AccountNumber::extract(path) else {
            debug!("No account number in {}", path);
            return Outcome::NotFound;
        };

        let cache = self.cache.clone();
        let upstream = self.upstream.clone();
        let key = number.cache_key();
        let task_number = number.clone();

        // Spawned so a client disconnect does not cancel the upstream call or
        // the cache write that follows it
        let fetch = tokio::spawn(async move {
            cache
                .fetch(&key, BALANCE_TTL, move || async move {
                    let balance = upstream.lookup_balance(task_number.as_str()).await?;
                    Ok::<_, UpstreamError>(BalanceRecord::new(task_number.as_str(), balance))
                })
                .await
        });

        let outcome = match fetch.await {
            Ok(result) => {
                log_failure(&number, &result);
                classify(result)
            }
            Err(e) => {
                warn!(number = %number, "Balance lookup task failed: {}", e);
                Outcome::Unavailable
            }
        };

        debug!(number = %number, status = %outcome.status(), "Balance lookup finished");
        outcome
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

// == Failure Logging ==
fn log_failure(
    number: &AccountNumber,
    result: &Result<BalanceRecord, FetchError<UpstreamError>>,
) {
    match result {
        Ok(_) => {}
        Err(FetchError::Producer(e)) if e.is_not_found() => {
            info!(number = %number, "Account not found upstream: {}", e);
        }
        Err(e) => warn!(number = %number, "Balance lookup failed: {}", e),
    }
}
