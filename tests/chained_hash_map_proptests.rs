// ChainedHashMap property tests (consolidated).
//
// Property 1: op-sequence agreement with a model map.
//  - Model: std::collections::HashMap<String, i32>, restricted to unique
//    live keys (the chained map shadows duplicates rather than replacing,
//    so inserts only run for keys absent from the model).
//  - Invariant: access/contains/len agree with the model after every op;
//    iter().count() == len() (the element count equals the sum of chain
//    lengths).
//  - Operations: insert-if-absent, delete, access, explicit rehash.
//
// Property 2: dynamic rehashing keeps the configured bounds.
//  - With bounds [0.6, 0.75], after every post-construction insert the
//    load factor never exceeds the max, `rehashes` is monotone, and all
//    live keys stay accessible.
use proptest::prelude::*;
use std::collections::HashMap;

use classic_collections::{ChainedHashMap, Error, MapConfig};

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, i32),
    Delete(u8),
    Access(u8),
    Rehash(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<u8>(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        any::<u8>().prop_map(Op::Delete),
        any::<u8>().prop_map(Op::Access),
        (1u8..=16).prop_map(Op::Rehash),
    ]
}

fn key_name(k: u8) -> String {
    format!("k{}", k % 24)
}

proptest! {
    #[test]
    fn prop_agrees_with_model_map(ops in proptest::collection::vec(op_strategy(), 1..200)) {
        let mut map: ChainedHashMap<i32> = ChainedHashMap::new();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let key = key_name(k);
                    if !model.contains_key(&key) {
                        map.insert(key.as_str(), v).unwrap();
                        model.insert(key, v);
                    }
                }
                Op::Delete(k) => {
                    let key = key_name(k);
                    match model.remove(&key) {
                        Some(v) => prop_assert_eq!(map.delete(key.as_str()), Ok(v)),
                        None => prop_assert_eq!(
                            map.delete(key.as_str()),
                            Err(Error::KeyNotFound { key })
                        ),
                    }
                }
                Op::Access(k) => {
                    let key = key_name(k);
                    match model.get(&key) {
                        Some(v) => prop_assert_eq!(map.access(key.as_str()), Ok(v)),
                        None => prop_assert_eq!(
                            map.access(key.as_str()),
                            Err(Error::KeyNotFound { key })
                        ),
                    }
                }
                Op::Rehash(buckets) => {
                    map.rehash_to_bucket_count(buckets as usize).unwrap();
                }
            }

            prop_assert_eq!(map.len(), model.len());
            prop_assert_eq!(map.iter().count(), map.len());
            for (key, value) in &model {
                prop_assert_eq!(map.access(key.as_str()), Ok(value));
            }
        }
    }

    #[test]
    fn prop_dynamic_bounds_hold_for_any_insert_sequence(count in 1usize..150) {
        let mut map = ChainedHashMap::with_config(
            MapConfig::new()
                .dynamic_rehashing(true)
                .load_factor_bounds(0.6, 0.75),
        )
        .unwrap();

        let mut last_rehashes = map.rehashes();
        for i in 0..count {
            map.insert(i, i as i32).unwrap();
            prop_assert!(map.load_factor() <= 0.75);
            prop_assert!(map.rehashes() >= last_rehashes);
            last_rehashes = map.rehashes();
        }
        for i in 0..count {
            prop_assert_eq!(map.access(i), Ok(&(i as i32)));
        }
        prop_assert_eq!(map.iter().count(), count);
    }
}
