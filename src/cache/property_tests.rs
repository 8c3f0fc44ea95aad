//! Property-Based Tests for the Cache Module

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::CacheStore;
use crate::storage::DataEntity;

const TEST_MAX_ENTRIES: usize = 100;

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.]{1,32}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String },
    Get { key: String },
    Invalidate { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Invalidate { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Hit and miss counters match the lookups performed.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES, None);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    store.put(key.clone(), DataEntity::new(key, value));
                }
                CacheOp::Get { key } => match store.get(&key) {
                    Some(_) => expected_hits += 1,
                    None => expected_misses += 1,
                },
                CacheOp::Invalidate { key } => {
                    store.invalidate(&key);
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, store.len());
    }

    // The last entity put under a key is the one returned, until invalidated.
    #[test]
    fn prop_last_put_wins_until_invalidated(
        key in key_strategy(),
        values in prop::collection::vec(value_strategy(), 1..5)
    ) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES, None);
        for value in &values {
            store.put(key.clone(), DataEntity::new(key.clone(), value.clone()));
        }

        let last = values.last().cloned().unwrap_or_default();
        prop_assert_eq!(store.get(&key).map(|e| e.value), Some(last));

        store.invalidate(&key);
        prop_assert!(store.get(&key).is_none());
    }

    // The store never holds more than its capacity.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..200)
    ) {
        let max_entries = 50;
        let mut store = CacheStore::new(max_entries, None);

        for (key, value) in entries {
            store.put(key.clone(), DataEntity::new(key, value));
            prop_assert!(store.len() <= max_entries);
        }
    }

    // Filling a full store evicts the least recently used key only.
    #[test]
    fn prop_lru_eviction_order(
        initial_keys in prop::collection::hash_set(key_strategy(), 2..10),
        new_key in key_strategy()
    ) {
        prop_assume!(!initial_keys.contains(&new_key));
        let keys: Vec<String> = initial_keys.into_iter().collect();

        let mut store = CacheStore::new(keys.len(), None);
        for key in &keys {
            store.put(key.clone(), DataEntity::new(key.clone(), "v"));
        }

        store.put(new_key.clone(), DataEntity::new(new_key.clone(), "v"));

        prop_assert_eq!(store.len(), keys.len());
        prop_assert!(store.get(&keys[0]).is_none());
        prop_assert!(store.get(&new_key).is_some());

        let survivors: HashSet<&String> = keys.iter().skip(1).collect();
        for key in survivors {
            prop_assert!(store.get(key).is_some());
        }
    }
}
