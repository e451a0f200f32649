//! Shared Cache Handle
//!
//! Thread-safe wrapper around [`CacheStore`] that owns the background sweep.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::tasks::{spawn_sweep_task, SweepTask};

// == TTL Cache ==
/// A TTL cache shared between concurrent callers.
///
/// Construct one per process (or per test) and pass it to whoever needs it;
/// wrap it in an `Arc` to share. The expiry sweep starts with the cache and
/// stops on [`shutdown`](Self::shutdown) or when the cache is dropped.
///
/// Concurrent misses on the same key are not de-duplicated: each caller runs
/// its own operation and the last `set` wins.
#[derive(Debug)]
pub struct TtlCache<V> {
    store: Arc<RwLock<CacheStore<V>>>,
    sweeper: Mutex<Option<SweepTask>>,
}

impl<V> TtlCache<V>
where
    V: Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache and starts its sweep task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: CacheConfig) -> Self {
        let store = Arc::new(RwLock::new(CacheStore::new(config.default_ttl)));
        let sweeper = spawn_sweep_task(store.clone(), config.sweep_interval);

        Self {
            store,
            sweeper: Mutex::new(Some(sweeper)),
        }
    }

    /// Returns a clone of the value for `key` if it is present and live.
    pub async fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.store.write().await.get(key).cloned()
    }

    /// Stores `value` under `key`; `None` uses the configured default TTL.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.store.write().await.set(key, value, ttl);
    }

    /// Reports whether a live entry exists without cloning it.
    pub async fn has(&self, key: &str) -> bool {
        self.store.write().await.has(key)
    }

    /// Removes `key` if present; returns whether anything was removed.
    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    /// Removes every entry and returns how many there were.
    pub async fn clear(&self) -> usize {
        self.store.write().await.clear()
    }

    /// Removes expired entries now instead of waiting for the next sweep.
    pub async fn clear_expired(&self) -> usize {
        self.store.write().await.clear_expired()
    }

    /// Snapshot of size, keys, timestamps and counters.
    ///
    /// Reports raw map contents, so it may include entries that expired but
    /// have not been swept yet.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Number of stored entries, expired-but-unswept ones included.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether no entries are stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Time left on the entry for `key`, if it is live.
    pub async fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.store.read().await.ttl_remaining(key)
    }

    /// The underlying store, for callers that need several operations under one lock.
    pub fn store(&self) -> Arc<RwLock<CacheStore<V>>> {
        Arc::clone(&self.store)
    }

    /// True until [`shutdown`](Self::shutdown) has been called.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    // == Shutdown ==
    /// Stops the background sweep and waits for it to exit.
    ///
    /// The cache stays usable afterwards; only the periodic sweep stops.
    /// Calling this more than once is a no-op.
    pub async fn shutdown(&self) {
        let task = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(task) = task {
            task.stop().await;
            debug!("Cache sweep stopped");
        }
    }
}
