//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check store behavior over arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashMap;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_DEFAULT_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-d]{1,2}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Has { key: String },
    Delete { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Has { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => Just(CacheOp::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // With nothing expiring, the store behaves exactly like a plain map and
    // the counters account for every lookup.
    #[test]
    fn prop_store_matches_model(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);
        let mut model: HashMap<String, String> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone(), None);
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    let expected = model.get(&key);
                    match expected {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                    prop_assert_eq!(store.get(&key), expected);
                }
                CacheOp::Has { key } => {
                    prop_assert_eq!(store.has(&key), model.contains_key(&key));
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), model.remove(&key).is_some());
                }
                CacheOp::Clear => {
                    prop_assert_eq!(store.clear(), model.len());
                    model.clear();
                }
            }
        }

        let stats = store.stats();
        let mut model_keys: Vec<String> = model.keys().cloned().collect();
        model_keys.sort();

        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.size, model.len());
        prop_assert_eq!(stats.keys, model_keys);
        prop_assert_eq!(stats.oldest_inserted_at.is_some(), !model.is_empty());
        prop_assert!(stats.oldest_inserted_at <= stats.newest_inserted_at);
    }

    // Overwriting a key keeps exactly one entry holding the latest value.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);

        store.set(key.clone(), value1, None);
        store.set(key.clone(), value2.clone(), None);

        prop_assert_eq!(store.get(&key), Some(&value2));
        prop_assert_eq!(store.len(), 1);
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // Sweeping removes exactly the short-lived entries and nothing else.
    #[test]
    fn prop_clear_expired_only_removes_stale(
        short in prop::collection::hash_set(key_strategy(), 0..6),
        long in prop::collection::hash_set("[e-h]{1,2}", 0..6),
    ) {
        let mut store = CacheStore::new(TEST_DEFAULT_TTL);

        for key in &short {
            store.set(key.clone(), 0u8, Some(Duration::from_millis(20)));
        }
        for key in &long {
            store.set(key.clone(), 1u8, None);
        }

        sleep(Duration::from_millis(40));

        prop_assert_eq!(store.clear_expired(), short.len());
        prop_assert_eq!(store.len(), long.len());
        for key in &long {
            prop_assert!(store.has(key), "Live key '{}' should survive the sweep", key);
        }
        prop_assert_eq!(store.clear_expired(), 0);
    }
}
