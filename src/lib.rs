//! Retry Cache - resilient execution for expensive, flaky remote operations
//!
//! Two independent pieces that callers compose:
//! - [`retry`]: retries an async operation with exponential backoff, retrying
//!   only errors whose message marks them as transient.
//! - [`cache`]: an in-process TTL cache with lazy expiry, a background sweep,
//!   and canonical search keys.
//!
//! ```ignore
//! let key = create_search_key(Some("Rust"), Some("Oslo"), None);
//! if let Some(hit) = cache.get(&key).await {
//!     return Ok(hit);
//! }
//! let listings = execute(|| scrape(&key), &RetryPolicy::network(), "search").await?;
//! cache.set(key, listings.clone(), None).await;
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod retry;
pub mod tasks;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use cache::{create_search_key, CacheStats, CacheStore, SearchParams, TtlCache};
pub use config::{CacheConfig, Config};
pub use error::{ConfigError, RetryError};
pub use retry::{execute, execute_with_cancel, CancelToken, RetryExecutor, RetryPolicy};
pub use telemetry::init_tracing;
