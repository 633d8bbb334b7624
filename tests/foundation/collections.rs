//! Integration tests for persistent collections

use propgen_foundation::{KeyedMap, Seq, ValueSet};

#[test]
fn seq_is_persistent() {
    let a: Seq<u32> = vec![1, 2].into();
    let b = a.push_back(3);
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 3);
    assert_eq!(b.last(), Some(&3));
}

#[test]
fn seq_equality_is_ordered() {
    let a: Seq<u32> = vec![1, 2].into();
    let b: Seq<u32> = vec![2, 1].into();
    assert_ne!(a, b);
}

#[test]
fn value_set_is_sorted_and_deduplicated() {
    let set: ValueSet<&str> = ["b", "a", "b"].into_iter().collect();
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn value_set_union() {
    let a: ValueSet<u8> = [1, 2].into_iter().collect();
    let b: ValueSet<u8> = [2, 3].into_iter().collect();
    assert_eq!(a.union(&b).len(), 3);
    assert_eq!(a.len(), 2);
}

#[test]
fn keyed_map_is_ordered_by_key() {
    let map: KeyedMap<u8, &str> = [(2, "two"), (1, "one")].into_iter().collect();
    let snapshot = map.clone();
    assert!(map.contains_key(&1));
    assert_eq!(map.get(&2), Some(&"two"));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(snapshot, map);
}
