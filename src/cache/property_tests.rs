//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the in-process store against a plain map model.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheStore, MAX_KEY_LENGTH};

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;
const LONG_TTL: Duration = Duration::from_secs(3600);

// == Strategies ==
/// Generates cache keys in the proxy's `namespace:number` shape
fn account_key_strategy() -> impl Strategy<Value = String> {
    "[0-9]{8}".prop_map(|number| format!("tuc:{}", number))
}

/// Generates JSON-encoded balance records
fn record_strategy() -> impl Strategy<Value = String> {
    (any::<u32>(), 0u32..100).prop_map(|(units, cents)| {
        format!(r#"{{"number":"00000000","balance":{}.{:02}}}"#, units, cents)
    })
}

#[derive(Debug, Clone)]
enum StoreOp {
    Set { key: String, value: String },
    Get { key: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    // A small key pool so gets and overwrites actually collide
    let key = prop::sample::select(vec![
        "tuc:11111111".to_string(),
        "tuc:22222222".to_string(),
        "tuc:33333333".to_string(),
        "tuc:44444444".to_string(),
    ]);
    prop_oneof![
        (key.clone(), record_strategy()).prop_map(|(key, value)| StoreOp::Set { key, value }),
        key.prop_map(|key| StoreOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a record and reading it back before expiry returns the same bytes.
    #[test]
    fn prop_roundtrip_storage(key in account_key_strategy(), value in record_strategy()) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);

        store.set(key.clone(), value.clone(), LONG_TTL).unwrap();

        prop_assert_eq!(store.get(&key), Some(value));
    }

    // Below capacity, the store behaves exactly like a map with last-write-wins.
    #[test]
    fn prop_matches_map_model(ops in prop::collection::vec(store_op_strategy(), 1..60)) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    store.set(key.clone(), value.clone(), LONG_TTL).unwrap();
                    model.insert(key, value);
                }
                StoreOp::Get { key } => {
                    prop_assert_eq!(store.get(&key), model.get(&key).cloned());
                }
            }
        }

        prop_assert_eq!(store.len(), model.len());
    }

    // The number of entries never exceeds the configured capacity.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((account_key_strategy(), record_strategy()), 1..200)
    ) {
        let max_entries = 50;
        let mut store = CacheStore::new(max_entries);

        for (key, value) in entries {
            store.set(key.clone(), value, LONG_TTL).unwrap();
            prop_assert!(store.len() <= max_entries);
            // The entry just written always survives its own eviction pass
            prop_assert!(store.contains(&key));
        }
    }

    // Keys over the length limit are rejected and leave the store untouched.
    #[test]
    fn prop_oversized_keys_rejected(extra in 1usize..64, value in record_strategy()) {
        let mut store = CacheStore::new(TEST_MAX_ENTRIES);
        let key = "k".repeat(MAX_KEY_LENGTH + extra);

        prop_assert!(store.set(key, value, LONG_TTL).is_err());
        prop_assert_eq!(store.len(), 0);
    }
}
