//! Configuration Module
//!
//! Loads cache settings from environment variables.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::cache::{DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};
use crate::error::ConfigError;

/// Environment variable holding the default entry TTL in seconds.
pub const DEFAULT_TTL_VAR: &str = "CACHE_DEFAULT_TTL_SECS";

/// Environment variable holding the sweep period in seconds.
pub const SWEEP_INTERVAL_VAR: &str = "CACHE_SWEEP_INTERVAL_SECS";

/// Process configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default TTL in seconds for entries stored without an explicit TTL
    pub default_ttl: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
}

/// Settings injected into a [`TtlCache`](crate::cache::TtlCache) at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub default_ttl: Duration,
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl Config {
    /// Loads the configuration from environment variables, falling back to
    /// defaults (with a warning) if any value is malformed.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL_SECS` - Default TTL in seconds (default: 1800)
    /// - `CACHE_SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 300)
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|err| {
            warn!(error = %err, "Invalid cache configuration, using defaults");
            Self::default()
        })
    }

    /// Strict variant of [`from_env`](Self::from_env).
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let default_ttl = read_secs(&lookup, DEFAULT_TTL_VAR)?.unwrap_or(defaults.default_ttl);
        let sweep_interval =
            read_secs(&lookup, SWEEP_INTERVAL_VAR)?.unwrap_or(defaults.sweep_interval);

        if sweep_interval == 0 {
            return Err(ConfigError::ZeroInterval(SWEEP_INTERVAL_VAR));
        }

        Ok(Self {
            default_ttl,
            sweep_interval,
        })
    }

    /// Converts to the settings consumed by the cache constructor.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            default_ttl: Duration::from_secs(self.default_ttl),
            sweep_interval: Duration::from_secs(self.sweep_interval),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL.as_secs(),
            sweep_interval: DEFAULT_SWEEP_INTERVAL.as_secs(),
        }
    }
}

fn read_secs<F>(lookup: &F, name: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
    }
}
