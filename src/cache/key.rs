//! Search Key Module
//!
//! Canonical cache keys for job searches so that differently-cased or padded
//! input lands on the same cache slot.

use serde::Deserialize;

/// Leading segment of every search key.
pub const SEARCH_KEY_PREFIX: &str = "job-search";

/// Separator between the prefix and each normalized field.
pub const SEARCH_KEY_DELIMITER: char = ':';

/// Builds `job-search:<keyword>:<location>:<source>` with each field trimmed and
/// lower-cased. Absent fields are treated as empty strings, so a search with no
/// parameters still maps to the shared key `job-search:::`.
pub fn create_search_key(
    keyword: Option<&str>,
    location: Option<&str>,
    source: Option<&str>,
) -> String {
    let mut key = String::from(SEARCH_KEY_PREFIX);
    for field in [keyword, location, source] {
        key.push(SEARCH_KEY_DELIMITER);
        key.push_str(&normalize(field));
    }
    key
}

fn normalize(field: Option<&str>) -> String {
    field.unwrap_or_default().trim().to_lowercase()
}

// == Search Params ==
/// Loosely-typed search input as it arrives from a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub source: Option<String>,
}

impl SearchParams {
    /// The cache key for these parameters. See [`create_search_key`].
    pub fn cache_key(&self) -> String {
        create_search_key(
            self.keyword.as_deref(),
            self.location.as_deref(),
            self.source.as_deref(),
        )
    }
}
