// Table property tests, checked against a std HashMap model.
//
// - Round-trip: get(k) after set(k, v) returns v.
// - Overwrite: a second set of the same key keeps len and replaces the value.
// - Uniqueness / completeness: a full iteration yields each model entry exactly once,
//   and len equals the number of pairs yielded.
// - Load factor: after every successful set, len <= capacity / 2 and capacity is a
//   power of two no smaller than 16.
// - Growth preserves data: every key stays retrievable across growths.
// - Absence: keys never inserted are absent at every size.
use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use strtable::{INITIAL_CAPACITY, Table};

/// Keys drawn from a small alphabet so overwrites are common
fn arb_key() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c'), any::<u8>()], 0..6)
}

proptest! {
    #[test]
    fn prop_matches_model(ops in proptest::collection::vec((arb_key(), any::<u32>()), 0..300)) {
        let mut table = Table::new();
        let mut model: HashMap<Vec<u8>, u32> = HashMap::new();

        for (key, value) in ops {
            let before = table.len();
            let stored = table.set(&key, value).map(<[u8]>::to_vec);
            prop_assert_eq!(stored.as_deref(), Ok(&key[..]));

            let existed = model.insert(key.clone(), value).is_some();
            prop_assert_eq!(table.len(), if existed { before } else { before + 1 });
            prop_assert_eq!(table.get(&key), Some(&value));

            prop_assert!(table.len() <= table.capacity() / 2);
            prop_assert!(table.capacity().is_power_of_two());
            prop_assert!(table.capacity() >= INITIAL_CAPACITY);
        }

        for (key, value) in &model {
            prop_assert_eq!(table.get(key), Some(value));
        }

        let mut seen = HashSet::new();
        let mut yielded = 0;
        for (key, value) in &table {
            prop_assert!(seen.insert(key.to_vec()), "duplicate key {:?}", key);
            prop_assert_eq!(model.get(key), Some(value));
            yielded += 1;
        }
        prop_assert_eq!(yielded, model.len());
        prop_assert_eq!(table.len(), model.len());
    }

    #[test]
    fn prop_growth_preserves_entries(count in 1usize..400) {
        let mut table = Table::new();
        let mut capacity = table.capacity();

        for i in 0..count {
            table.set(&format!("key-{i}"), i).map_err(|e| TestCaseError::fail(e.to_string()))?;
            if table.capacity() != capacity {
                prop_assert_eq!(table.capacity(), capacity * 2);
                capacity = table.capacity();
                for j in 0..=i {
                    prop_assert_eq!(table.get(&format!("key-{j}")), Some(&j));
                }
            }
        }
        prop_assert_eq!(table.len(), count);
    }

    #[test]
    fn prop_absent_keys(inserted in proptest::collection::hash_set("[a-m]{1,8}", 0..200),
                        probes in proptest::collection::vec("[n-z]{1,8}", 1..50)) {
        let mut table = Table::new();
        prop_assert_eq!(table.get(&probes[0]), None);
        for key in &inserted {
            table.set(key, ()).map_err(|e| TestCaseError::fail(e.to_string()))?;
            for probe in &probes {
                prop_assert_eq!(table.get(probe), None);
                prop_assert_eq!(table.probe_length(probe), None);
            }
        }
    }

    #[test]
    fn prop_into_iter_returns_every_entry(keys in proptest::collection::hash_set("[a-z]{0,6}", 0..100)) {
        let mut table = Table::new();
        for key in &keys {
            table.set(key, key.len()).map_err(|e| TestCaseError::fail(e.to_string()))?;
        }

        let drained: HashMap<Box<[u8]>, usize> = table.into_iter().collect();
        prop_assert_eq!(drained.len(), keys.len());
        for key in &keys {
            prop_assert_eq!(drained.get(key.as_bytes()), Some(&key.len()));
        }
    }
}

#[test]
fn nine_keys_trigger_one_growth() {
    let mut table = Table::new();
    let mut growths = 0;
    for i in 0..9 {
        let capacity = table.capacity();
        assert!(table.set(&format!("word{i}"), i).is_ok());
        if table.capacity() != capacity {
            growths += 1;
        }
    }

    assert_eq!(growths, 1);
    assert_eq!(table.capacity(), 32);
    for i in 0..9 {
        assert_eq!(table.get(&format!("word{i}")), Some(&i));
    }
}
