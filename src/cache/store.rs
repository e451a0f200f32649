//! Cache Store Module
//!
//! Single-owner map of keys to TTL-bounded entries. Every operation is
//! infallible: absence, expiry and double deletion are ordinary states.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// In-process cache holding values of one type with lazy and swept expiry.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
    hits: u64,
    misses: u64,
    expirations: u64,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL for entries inserted without an explicit one
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
            hits: 0,
            misses: 0,
            expirations: 0,
        }
    }

    /// The TTL used when `set` receives `None`.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Set ==
    /// Stores a value, replacing any previous entry for the key and resetting its TTL.
    ///
    /// # Arguments
    /// * `key` - The key to store under
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses `default_ttl` if None)
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        let ttl = ttl.unwrap_or(self.default_ttl);
        debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "Cache set");
        self.entries.insert(key, CacheEntry::new(value, ttl));
    }

    // == Get ==
    /// Returns the value if present and not expired.
    ///
    /// An expired entry is removed as a side effect and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        if self.evict_if_stale(key) {
            self.hits += 1;
            debug!(key, "Cache hit");
            self.entries.get(key).map(|entry| &entry.value)
        } else {
            self.misses += 1;
            debug!(key, "Cache miss");
            None
        }
    }

    // == Has ==
    /// Reports whether a live entry exists, removing it if it has expired.
    ///
    /// Does not count towards hits or misses.
    pub fn has(&mut self, key: &str) -> bool {
        self.evict_if_stale(key)
    }

    // == Delete ==
    /// Removes an entry. Deleting an absent key is a no-op.
    ///
    /// Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            debug!(key, "Cache entry deleted");
        }
        removed
    }

    // == Clear ==
    /// Removes every entry and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        info!(removed, "Cache cleared");
        removed
    }

    // == Clear Expired ==
    /// Removes all entries whose TTL has elapsed, whether or not they are accessed again.
    ///
    /// Returns the number of entries removed.
    pub fn clear_expired(&mut self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        self.expirations += removed as u64;
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the store's contents and counters.
    pub fn stats(&self) -> CacheStats {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort_unstable();

        let inserted = self.entries.values().map(|entry| entry.inserted_at);

        CacheStats {
            size: self.entries.len(),
            keys,
            oldest_inserted_at: inserted.clone().min(),
            newest_inserted_at: inserted.max(),
            hits: self.hits,
            misses: self.misses,
            expirations: self.expirations,
        }
    }

    /// Time left before the entry for `key` expires, `None` if absent or already expired.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(CacheEntry::ttl_remaining)
    }

    // == Length ==
    /// Returns the number of entries held, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if a live entry exists for `key`; drops the entry if it has expired.
    fn evict_if_stale(&mut self, key: &str) -> bool {
        match self.entries.get(key) {
            None => false,
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.expirations += 1;
                debug!(key, "Cache entry expired");
                false
            }
            Some(_) => true,
        }
    }
}
