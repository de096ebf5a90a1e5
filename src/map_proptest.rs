#![cfg(test)]

// Property tests for OpenAddressingMap kept inside the crate so they can
// sweep structural invariants the public API cannot observe.

use crate::map::OpenAddressingMap;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let pool: Vec<String> = {
            let mut p = pool;
            p.sort();
            p.dedup();
            p
        };
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            idx.clone().prop_map(OpI::Contains),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - insert returns the model's previous value; get/remove/contains agree
//   with the model, including KeyNotFound on absent keys.
// - `len` matches the model after each op; the load-factor bound holds
//   after every insert; capacity stays a power of two, at least 8.
// - `iter` yields each live entry exactly once with the model's values.
// - The structural sweep (`assert_invariants`) passes after each op:
//   occupied-slot count equals `len` and every stored hash still reaches
//   its slot from the home position.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: OpenAddressingMap<String, i32> = OpenAddressingMap::new();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = pool[i].clone();
                    let previous = sut.insert(k.clone(), v);
                    prop_assert_eq!(previous, model.insert(k, v));
                    let capacity = sut.capacity();
                    prop_assert!(sut.len() * 3 < capacity * 2, "load factor bound violated");
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.remove(k.as_str()).ok(), model.remove(k));
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k.as_str()).ok(), model.get(k));
                }
                OpI::Contains(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.contains_key(k.as_str()), model.contains_key(k));
                }
                OpI::Iterate => {
                    let mut seen: Vec<(String, i32)> =
                        sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    seen.sort();
                    let mut expected: Vec<(String, i32)> =
                        model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    expected.sort();
                    prop_assert_eq!(seen, expected);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            let capacity = sut.capacity();
            prop_assert!(capacity.is_power_of_two() && capacity >= 8);
            sut.assert_invariants();
        }
    }
}

// Property: heavy collision pressure. Every key shares one probe chain, so
// correctness cannot lean on hash spread; tombstone reuse and chain
// continuation carry the whole sequence.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_single_chain_equivalence(ops in proptest::collection::vec((0u8..3, 0usize..6, any::<i32>()), 1..60)) {
        #[derive(Clone, Default)]
        struct ConstBuildHasher;
        struct ConstHasher;
        impl core::hash::BuildHasher for ConstBuildHasher {
            type Hasher = ConstHasher;
            fn build_hasher(&self) -> Self::Hasher {
                ConstHasher
            }
        }
        impl core::hash::Hasher for ConstHasher {
            fn write(&mut self, _bytes: &[u8]) {}
            fn finish(&self) -> u64 {
                0
            }
        }

        let mut sut: OpenAddressingMap<String, i32, ConstBuildHasher> =
            OpenAddressingMap::with_hasher(ConstBuildHasher);
        let mut model: HashMap<String, i32> = HashMap::new();

        for (op, i, v) in ops {
            let k = format!("k{}", i);
            match op {
                0 => {
                    prop_assert_eq!(sut.insert(k.clone(), v), model.insert(k, v));
                }
                1 => {
                    prop_assert_eq!(sut.remove(k.as_str()).ok(), model.remove(&k));
                }
                2 => {
                    prop_assert_eq!(sut.get(k.as_str()).ok(), model.get(&k));
                }
                _ => unreachable!(),
            }
            prop_assert_eq!(sut.len(), model.len());
            sut.assert_invariants();
        }
    }
}
