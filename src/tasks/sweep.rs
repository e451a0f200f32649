//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;

/// Shortest period accepted by the sweeper; `tokio::time::interval` rejects zero.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to a running sweep task.
///
/// Dropping the handle closes the shutdown channel, which also ends the task
/// on its next poll.
#[derive(Debug)]
pub struct SweepTask {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl SweepTask {
    /// Signals the task to stop and waits for it to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(err) = self.handle.await {
            if !err.is_cancelled() {
                warn!(error = %err, "Cache sweep task ended abnormally");
            }
        }
    }

    /// Aborts the task without waiting.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns a task that calls [`CacheStore::clear_expired`] every `interval`.
///
/// The first sweep happens one full interval after spawning. The task takes
/// the store's write lock for each sweep, the same lock direct callers use.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::<String>::new(DEFAULT_TTL)));
/// let sweeper = spawn_sweep_task(store.clone(), DEFAULT_SWEEP_INTERVAL);
/// // Later, during shutdown:
/// sweeper.stop().await;
/// ```
pub fn spawn_sweep_task<V>(store: Arc<RwLock<CacheStore<V>>>, interval: Duration) -> SweepTask
where
    V: Send + Sync + 'static,
{
    let interval = interval.max(MIN_SWEEP_INTERVAL);
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        info!(
            interval_ms = interval.as_millis() as u64,
            "Starting cache sweep task"
        );

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = store.write().await.clear_expired();

                    if removed > 0 {
                        info!(removed, "Cache sweep removed expired entries");
                    } else {
                        debug!("Cache sweep found no expired entries");
                    }
                }
                // Fires on an explicit stop and when the handle is dropped
                _ = shutdown_rx.changed() => {
                    debug!("Cache sweep task stopping");
                    break;
                }
            }
        }
    });

    SweepTask { shutdown, handle }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let store = Arc::new(RwLock::new(CacheStore::new(Duration::from_secs(300))));

        store
            .write()
            .await
            .set("expire_soon", "value", Some(Duration::from_millis(20)));

        let sweeper = spawn_sweep_task(store.clone(), Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(200)).await;

        // Removed without anyone reading the key
        let guard = store.read().await;
        assert_eq!(guard.len(), 0);
        assert_eq!(guard.stats().expirations, 1);
        drop(guard);

        sweeper.stop().await;
    }

    #[tokio::test]
    async fn test_sweep_preserves_live_entries() {
        let store = Arc::new(RwLock::new(CacheStore::new(Duration::from_secs(300))));

        store.write().await.set("long_lived", "value", None);

        let sweeper = spawn_sweep_task(store.clone(), Duration::from_millis(20));

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(store.write().await.get("long_lived"), Some(&"value"));

        sweeper.stop().await;
    }

    #[tokio::test]
    async fn test_sweep_stop_finishes_task() {
        let store = Arc::new(RwLock::new(CacheStore::<u8>::new(Duration::from_secs(1))));

        let sweeper = spawn_sweep_task(store, Duration::from_secs(3600));

        // Completes promptly even though the next tick is an hour away
        tokio::time::timeout(Duration::from_secs(1), sweeper.stop())
            .await
            .expect("sweep task should stop promptly");
    }

    #[tokio::test]
    async fn test_sweep_can_be_aborted() {
        let store = Arc::new(RwLock::new(CacheStore::<u8>::new(Duration::from_secs(1))));

        let sweeper = spawn_sweep_task(store, Duration::from_secs(1));
        sweeper.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(sweeper.is_finished(), "Task should be finished after abort");
    }

    #[tokio::test]
    async fn test_zero_interval_is_clamped() {
        let store = Arc::new(RwLock::new(CacheStore::<u8>::new(Duration::from_secs(1))));

        let sweeper = spawn_sweep_task(store, Duration::ZERO);
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(!sweeper.is_finished());
        sweeper.stop().await;
    }
}
