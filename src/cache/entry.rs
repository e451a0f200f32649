//! Cache Entry Module
//!
//! Defines a single cached value together with its insertion and expiry times.

use std::time::Duration;

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A stored value with the wall-clock window during which it may be observed.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was inserted; never changes for the life of the entry
    pub inserted_at: DateTime<Utc>,
    /// `inserted_at + ttl`
    pub expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry inserted now that stays live for `ttl`.
    pub fn new(value: V, ttl: Duration) -> Self {
        Self::with_inserted_at(value, Utc::now(), ttl)
    }

    /// Creates an entry with an explicit insertion time.
    pub fn with_inserted_at(value: V, inserted_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            value,
            inserted_at,
            expires_at: expiry_after(inserted_at, ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is live while `now <= expires_at` and expired strictly after.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a caller-supplied clock reading.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    // == Time To Live ==
    /// Returns how long the entry has left, or zero once it has expired.
    pub fn ttl_remaining(&self) -> Duration {
        (self.expires_at - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

// == Utility Functions ==
/// Adds `ttl` to `start`, saturating at the latest representable timestamp.
fn expiry_after(start: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|delta| start.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
