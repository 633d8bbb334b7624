//! Integration tests for Filter and Rekey chained across passes

use propgen_pipeline::{Filter, FilterCache, Rekey, RekeyCache, group_by_owner};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Row {
    owner: &'static str,
    value: i32,
    keep: bool,
}

fn row(owner: &'static str, value: i32, keep: bool) -> Row {
    Row { owner, value, keep }
}

struct Chain {
    filter: Filter<u32, Row>,
    rekey: Rekey<u32, Row, &'static str>,
}

impl Chain {
    fn new() -> Self {
        Self {
            filter: Filter::new("keep", |_, r: &Row| r.keep),
            rekey: Rekey::new("owner", |r: &Row| r.owner),
        }
    }
}

#[test]
fn filter_then_rekey() {
    let chain = Chain::new();
    let rows = vec![(1, row("A", 1, true)), (2, row("B", 2, false)), (3, row("A", 3, true))];

    let kept = chain.filter.run(rows, &FilterCache::new()).unwrap();
    let keyed = chain.rekey.run(kept.items, &RekeyCache::new()).unwrap();

    let owners: Vec<(&str, u32)> = keyed.items.iter().map(|(g, k, _)| (*g, *k)).collect();
    assert_eq!(owners, vec![("A", 1), ("A", 3)]);
}

#[test]
fn dropping_an_item_downstream_is_seen_as_removal() {
    let chain = Chain::new();

    let kept1 = chain
        .filter
        .run(vec![(1, row("A", 1, true)), (2, row("B", 2, true))], &FilterCache::new())
        .unwrap();
    let keyed1 = chain.rekey.run(kept1.items, &RekeyCache::new()).unwrap();

    // Item 2 is no longer kept
    let kept2 = chain
        .filter
        .run(vec![(1, row("A", 1, true)), (2, row("B", 2, false))], &kept1.cache)
        .unwrap();
    let keyed2 = chain.rekey.run(kept2.items, &keyed1.cache).unwrap();

    assert_eq!(kept2.stats.recomputed, vec![2]);
    assert_eq!(keyed2.stats.removed, vec![2]);
    assert_eq!(keyed2.stats.cached, 1);
}

#[test]
fn moving_an_item_between_owners() {
    let chain = Chain::new();

    let keyed1 = chain
        .rekey
        .run(vec![(1, row("A", 1, true)), (2, row("A", 2, true))], &RekeyCache::new())
        .unwrap();
    let keyed2 = chain
        .rekey
        .run(vec![(1, row("A", 1, true)), (2, row("B", 2, true))], &keyed1.cache)
        .unwrap();

    let owner_of = |r: &Row| r.owner;
    let before = group_by_owner(keyed1.items.into_iter().map(|(_, _, r)| r), owner_of);
    let after = group_by_owner(keyed2.items.into_iter().map(|(_, _, r)| r), owner_of);
    let delta = after.changed_since(&before);

    assert_eq!(delta.modified, vec!["A"]);
    assert_eq!(delta.added, vec!["B"]);
    assert!(delta.removed.is_empty());
}
