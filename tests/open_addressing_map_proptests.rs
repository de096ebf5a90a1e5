// OpenAddressingMap property tests (consolidated).
//
// Property 1: round-trip against a reference map.
//  - Model: std::collections::HashMap over the same operations.
//  - Invariant: get(key) returns the last value inserted for key and not
//    subsequently removed; len() equals the model's; absent keys report
//    KeyNotFound / false.
//  - Operations: insert, remove, get, contains_key over a small key pool
//    so removes and updates actually hit live entries.
//
// Property 2: capacity discipline under phased workloads.
//  - Insert-heavy then remove-heavy phases force growth and shrink.
//  - Invariant: after every insert, len/capacity stays strictly under
//    2/3; capacity is always a power of two, at least 8; every surviving
//    key is retrievable after the phases complete.
use probe_map::OpenAddressingMap;
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, i64),
    Remove(u8),
    Get(u8),
    Contains(u8),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        (any::<u8>(), any::<i64>()).prop_map(|(k, v)| Op::Insert(k % 24, v)),
        any::<u8>().prop_map(|k| Op::Remove(k % 24)),
        any::<u8>().prop_map(|k| Op::Get(k % 24)),
        any::<u8>().prop_map(|k| Op::Contains(k % 24)),
    ];
    proptest::collection::vec(op, 1..120)
}

proptest! {
    #[test]
    fn prop_round_trip(ops in arb_ops()) {
        let mut sut: OpenAddressingMap<String, i64> = OpenAddressingMap::new();
        let mut model: HashMap<String, i64> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let key = format!("k{}", k);
                    prop_assert_eq!(sut.insert(key.clone(), v), model.insert(key, v));
                }
                Op::Remove(k) => {
                    let key = format!("k{}", k);
                    prop_assert_eq!(sut.remove(key.as_str()).ok(), model.remove(&key));
                }
                Op::Get(k) => {
                    let key = format!("k{}", k);
                    prop_assert_eq!(sut.get(key.as_str()).ok(), model.get(&key));
                }
                Op::Contains(k) => {
                    let key = format!("k{}", k);
                    prop_assert_eq!(sut.contains_key(key.as_str()), model.contains_key(&key));
                }
            }
            prop_assert_eq!(sut.len(), model.len());
        }
    }
}

proptest! {
    #[test]
    fn prop_capacity_discipline(inserts in 1usize..400, keep_every in 1usize..10) {
        let mut m: OpenAddressingMap<u64, u64> = OpenAddressingMap::new();

        for i in 0..inserts as u64 {
            m.insert(i, i);
            prop_assert!(
                m.len() * 3 < m.capacity() * 2,
                "load factor bound violated at len {} capacity {}",
                m.len(),
                m.capacity()
            );
            prop_assert!(m.capacity().is_power_of_two() && m.capacity() >= 8);
        }

        // Remove everything not on the keep stride, forcing shrink.
        for i in 0..inserts as u64 {
            if i % keep_every as u64 != 0 {
                m.remove(&i).unwrap();
            }
            prop_assert!(m.capacity().is_power_of_two() && m.capacity() >= 8);
        }

        for i in 0..inserts as u64 {
            if i % keep_every as u64 == 0 {
                prop_assert_eq!(m.get(&i), Ok(&i));
            } else {
                prop_assert!(m.get(&i).is_err());
            }
        }
    }
}
