use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

fn validate_tree(t: &SymbolTable) {
    let issues = t.verify_integrity();
    assert!(issues.is_empty(), "integrity issues: {issues:#?}\n{}", t.dump());
}

fn key_strategy() -> impl Strategy<Value = String> {
    // A three-letter alphabet keeps keys colliding on prefixes, which is
    // where splits and merges happen.
    "[abc]{1,8}"
}

fn value_strategy() -> impl Strategy<Value = Value> {
    any::<i32>().prop_filter_map("zero is not storable", Value::new)
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 5)]
    Put(
        #[proptest(strategy = "key_strategy()")] String,
        #[proptest(strategy = "value_strategy()")] Value,
    ),
    #[proptest(weight = 3)]
    Remove(#[proptest(strategy = "key_strategy()")] String),
    #[proptest(weight = 2)]
    Get(#[proptest(strategy = "key_strategy()")] String),
    #[proptest(weight = 1)]
    Complete(#[proptest(strategy = "\"[abc]{0,4}\"")] String),
}

/// What `complete` must produce, computed from the key set: the longest
/// common prefix of every key extending `buf`. An empty buffer sits on the
/// root boundary and is never extended.
fn expected_completion(m: &BTreeMap<String, Value>, buf: &str) -> String {
    if buf.is_empty() {
        return String::new();
    }
    let matching: Vec<&String> = m.keys().filter(|k| k.starts_with(buf)).collect();
    let Some(first) = matching.first() else {
        return buf.to_owned();
    };
    let mut lcp = first.len();
    for k in &matching[1..] {
        lcp = lcp.min(crate::node::common_prefix_len(first, k));
    }
    first[..lcp].to_owned()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=500)) {
        let mut t = SymbolTable::new();
        let mut m: BTreeMap<String, Value> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    let old_t = t.put(&key, value.get());
                    let old_m = m.insert(key, value);
                    prop_assert_eq!(old_t, Ok(old_m));
                }
                Op::Remove(key) => {
                    let old_t = t.remove(&key);
                    let old_m = m.remove(&key);
                    prop_assert_eq!(old_t, old_m);
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key), m.get(&key).copied());
                }
                Op::Complete(prefix) => {
                    let mut buf = prefix.clone();
                    let modified = t.complete(&mut buf);
                    let expected = expected_completion(&m, &prefix);
                    prop_assert_eq!(&buf, &expected);
                    prop_assert_eq!(modified, expected != prefix);
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_tree(&t);
        let got: Vec<(String, Value)> = t.iter().collect();
        let expected: Vec<(String, Value)> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_prefix_iter_matches_filter(
        keys in prop::collection::btree_set(key_strategy(), 0..64),
        prefix in "[abc]{0,4}",
    ) {
        let t: SymbolTable = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_str(), Value::new(i as i32 + 1).unwrap()))
            .collect();

        let got: Vec<String> = t.prefix_iter(&prefix).map(|(k, _)| k).collect();
        let expected: Vec<String> = keys.iter().filter(|k| k.starts_with(&prefix)).cloned().collect();
        prop_assert_eq!(&got, &expected);

        let mut seen = 0;
        let n = t.for_each_prefix(&prefix, 3, |k, _| {
            assert!(k.starts_with(&prefix));
            seen += 1;
        });
        prop_assert_eq!(n, expected.len().min(3));
        prop_assert_eq!(seen, n);
    }

    #[test]
    fn prop_remove_all_restores_empty_root(keys in prop::collection::vec(key_strategy(), 0..64)) {
        let mut t = SymbolTable::new();
        for k in &keys {
            t.put(k, 1).unwrap();
        }
        validate_tree(&t);
        for k in &keys {
            t.remove(k);
            validate_tree(&t);
        }
        prop_assert!(t.is_empty());
        prop_assert_eq!(t.node_count(), 1);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

const SMALL_SET: [&str; 6] = ["a", "ab", "abc", "abd", "b", "ba"];

#[test]
fn exhaustive_insert_order_small_set() {
    let mut reference: Option<String> = None;

    for_each_permutation(&SMALL_SET, |perm| {
        let mut t = SymbolTable::new();
        for k in &perm {
            let value = SMALL_SET.iter().position(|s| s == k).unwrap() as i32 + 1;
            assert_eq!(t.put(k, value), Ok(None));
        }

        validate_tree(&t);
        // The compressed shape depends only on the key set, not on insertion order.
        let dump = t.dump();
        match &reference {
            Some(r) => assert_eq!(&dump, r, "insert order {perm:?}"),
            None => reference = Some(dump),
        }
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    // Insert in a fixed order, then remove in all permutations.
    let mut base_table = SymbolTable::new();
    let mut base_map: BTreeMap<String, Value> = BTreeMap::new();
    for (i, k) in SMALL_SET.iter().enumerate() {
        let value = Value::new(i as i32 + 1).unwrap();
        assert_eq!(base_table.insert(k, value), Ok(base_map.insert(k.to_string(), value)));
    }

    for_each_permutation(&SMALL_SET, |perm| {
        let mut t = base_table.clone();
        let mut m = base_map.clone();

        for k in perm {
            assert_eq!(t.remove(k), m.remove(k));
            assert_eq!(t.len(), m.len());
            validate_tree(&t);
            for (key, value) in &m {
                assert_eq!(t.get(key), Some(*value));
            }
        }
        assert_eq!(t.len(), 0);
        assert_eq!(t.node_count(), 1);
    });
}
