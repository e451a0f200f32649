//! Cache Statistics Module
//!
//! Read-only snapshot of the store contents plus lookup counters.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of a cache store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of entries currently held (expired-but-unswept entries included)
    pub size: usize,
    /// Keys currently held, sorted
    pub keys: Vec<String>,
    /// Insertion time of the oldest entry, `None` when empty
    pub oldest_inserted_at: Option<DateTime<Utc>>,
    /// Insertion time of the newest entry, `None` when empty
    pub newest_inserted_at: Option<DateTime<Utc>>,
    /// Lookups that returned a live value
    pub hits: u64,
    /// Lookups that found nothing live
    pub misses: u64,
    /// Entries removed because their TTL elapsed (lazily or by sweep)
    pub expirations: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// True when the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}
