//! Property-Based Tests for the facade and admission control
//!
//! Uses proptest to check the read/write/delete properties and the capacity
//! bound over arbitrary sequential operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

use crate::admission::Capacity;
use crate::error::CacheError;
use crate::facade::{CacheFacade, Lookup, PutCommand, Removal};
use crate::store::{MemoryStore, StoreClient};

// == Strategies ==
/// Generates valid cache keys
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}"
}

/// Generates valid cache values
fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

/// Operations over a small key space so that collisions are common
fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    let key = "[a-e]";
    prop_oneof![
        (key, valid_value_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        key.prop_map(|key| CacheOp::Get { key }),
        key.prop_map(|key| CacheOp::Delete { key }),
    ]
}

fn new_facade(capacity: Capacity) -> (CacheFacade, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (CacheFacade::new(store.clone(), capacity), store)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a pair and reading it back returns the stored value.
    #[test]
    fn prop_put_then_get(key in valid_key_strategy(), value in valid_value_strategy()) {
        tokio_test::block_on(async {
            let (facade, _) = new_facade(Capacity::Unlimited);

            facade.put(PutCommand::new(key.clone(), value.clone(), None)).await.unwrap();

            assert_eq!(facade.get(&key).await.unwrap(), Lookup::Found(value));
        });
    }

    // Keys never written are not found.
    #[test]
    fn prop_absent_key_not_found(key in valid_key_strategy()) {
        tokio_test::block_on(async {
            let (facade, _) = new_facade(Capacity::Unlimited);
            assert_eq!(facade.get(&key).await.unwrap(), Lookup::NotFound);
        });
    }

    // An empty key or value is rejected regardless of what the store holds.
    #[test]
    fn prop_empty_fields_invalid(
        existing in prop::collection::vec(valid_key_strategy(), 0..10),
        key in valid_key_strategy(),
        value in valid_value_strategy(),
    ) {
        tokio_test::block_on(async {
            let (facade, store) = new_facade(Capacity::Limited(5));
            for k in &existing {
                store.set(k, "x", None).await.unwrap();
            }

            let empty_key = facade.put(PutCommand::new("", value.clone(), None)).await;
            let empty_value = facade.put(PutCommand::new(key.clone(), "", None)).await;

            assert!(matches!(empty_key, Err(CacheError::InvalidRequest(_))));
            assert!(matches!(empty_value, Err(CacheError::InvalidRequest(_))));
        });
    }

    // Deleting a present key removes it; deleting again reports not found.
    #[test]
    fn prop_delete_removes_entry(key in valid_key_strategy(), value in valid_value_strategy()) {
        tokio_test::block_on(async {
            let (facade, _) = new_facade(Capacity::Unlimited);
            facade.put(PutCommand::new(key.clone(), value, None)).await.unwrap();

            assert_eq!(facade.delete(&key).await.unwrap(), Removal::Deleted);
            assert_eq!(facade.get(&key).await.unwrap(), Lookup::NotFound);
            assert_eq!(facade.delete(&key).await.unwrap(), Removal::NotFound);
        });
    }

    // Sequential writes never push the store past its capacity, and a write is
    // rejected exactly when the store is already full.
    #[test]
    fn prop_capacity_bound(
        max in 1u64..4,
        ops in prop::collection::vec(cache_op_strategy(), 1..60),
    ) {
        tokio_test::block_on(async {
            let (facade, store) = new_facade(Capacity::Limited(max));
            let mut live: HashSet<String> = HashSet::new();

            for op in ops {
                match op {
                    CacheOp::Put { key, value } => {
                        let full = live.len() as u64 >= max;
                        let result = facade.put(PutCommand::new(key.clone(), value, None)).await;
                        if full {
                            assert!(matches!(result, Err(CacheError::CapacityExceeded)));
                        } else {
                            assert!(result.is_ok());
                            live.insert(key);
                        }
                    }
                    CacheOp::Get { key } => {
                        let found = matches!(facade.get(&key).await.unwrap(), Lookup::Found(_));
                        assert_eq!(found, live.contains(&key));
                    }
                    CacheOp::Delete { key } => {
                        let removal = facade.delete(&key).await.unwrap();
                        let expected = if live.remove(&key) {
                            Removal::Deleted
                        } else {
                            Removal::NotFound
                        };
                        assert_eq!(removal, expected);
                    }
                }

                let size = store.size().await.unwrap();
                assert_eq!(size, live.len() as u64);
                assert!(size <= max);
            }
        });
    }
}
