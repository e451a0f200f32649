//! Cache Module
//!
//! In-process memoization of expensive results with TTL expiration, a shared
//! handle with a background expiry sweep, and canonical search keys.

mod entry;
mod handle;
mod key;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

// Re-export public types
pub use entry::CacheEntry;
pub use handle::TtlCache;
pub use key::{create_search_key, SearchParams, SEARCH_KEY_DELIMITER, SEARCH_KEY_PREFIX};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// TTL applied when a caller does not pass one (30 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Period of the background expiry sweep (5 minutes)
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);
