//! Group-by-owner reduction.
//!
//! Buckets a discovery-ordered item stream by a grouping key. Owners appear
//! in first-seen order and members keep their discovery order, so the same
//! input always produces the same groups. Group equality is key equality
//! plus ordered member equality; comparing against the previous pass's
//! [`Groups`] tells exactly which owners need re-emission.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use propgen_foundation::{KeyedMap, Seq};

/// Buckets values by the owner key `owner_of` derives from each one.
///
/// Equivalent to [`Groups::from_items`] over `(owner_of(v), v)` pairs.
pub fn group_by_owner<G, V, I, F>(items: I, owner_of: F) -> Groups<G, V>
where
    G: Clone + Ord,
    V: Clone,
    I: IntoIterator<Item = V>,
    F: Fn(&V) -> G,
{
    Groups::from_items(items.into_iter().map(|v| (owner_of(&v), v)))
}

/// Members of one owner, in discovery order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Group<G, V>
where
    G: Clone,
    V: Clone,
{
    /// Owner key.
    pub key: G,
    /// Members in discovery order.
    pub items: Seq<V>,
}

impl<G: Clone, V: Clone> Group<G, V> {
    /// Returns the number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// How two [`Groups`] snapshots differ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupDelta<G> {
    /// Owners new in this pass.
    pub added: Vec<G>,
    /// Owners whose members changed.
    pub modified: Vec<G>,
    /// Owners gone in this pass.
    pub removed: Vec<G>,
    /// Number of owners with identical groups.
    pub unchanged: usize,
}

impl<G> GroupDelta<G> {
    /// Returns true if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }
}

/// All groups of one pass.
#[derive(Clone, Debug)]
pub struct Groups<G, V>
where
    G: Clone + Ord,
    V: Clone,
{
    order: Seq<G>,
    groups: KeyedMap<G, Group<G, V>>,
}

impl<G: Clone + Ord, V: Clone> Default for Groups<G, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Clone + Ord, V: Clone> Groups<G, V> {
    /// Creates an empty set of groups.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: Seq::new(),
            groups: KeyedMap::new(),
        }
    }

    /// Buckets `(key, value)` pairs, preserving first-seen order.
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (G, V)>,
    {
        let mut order = Vec::new();
        let mut buckets: BTreeMap<G, Vec<V>> = BTreeMap::new();

        for (key, value) in items {
            match buckets.entry(key) {
                Entry::Vacant(e) => {
                    order.push(e.key().clone());
                    e.insert(vec![value]);
                }
                Entry::Occupied(mut e) => e.get_mut().push(value),
            }
        }

        let groups = buckets
            .into_iter()
            .map(|(key, values)| {
                let group = Group {
                    key: key.clone(),
                    items: values.into(),
                };
                (key, group)
            })
            .collect();

        Self {
            order: order.into(),
            groups,
        }
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the group for a key.
    #[must_use]
    pub fn get(&self, key: &G) -> Option<&Group<G, V>> {
        self.groups.get(key)
    }

    /// Iterates groups in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Group<G, V>> {
        self.order.iter().filter_map(|key| self.groups.get(key))
    }

    /// Iterates owner keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &G> {
        self.order.iter()
    }

    /// Iterates every member of every group, owner by owner.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().flat_map(|g| g.items.iter())
    }
}

impl<G: Clone + Ord, V: Clone + PartialEq> Groups<G, V> {
    /// Compares this pass's groups against the previous pass's.
    #[must_use]
    pub fn changed_since(&self, previous: &Self) -> GroupDelta<G> {
        let mut delta = GroupDelta {
            added: Vec::new(),
            modified: Vec::new(),
            removed: Vec::new(),
            unchanged: 0,
        };

        for group in self.iter() {
            match previous.get(&group.key) {
                None => delta.added.push(group.key.clone()),
                Some(prev) if prev == group => delta.unchanged += 1,
                Some(_) => delta.modified.push(group.key.clone()),
            }
        }
        delta.removed = previous
            .keys()
            .filter(|k| self.get(k).is_none())
            .cloned()
            .collect();

        delta
    }
}

/// Discovery order of owners is not part of identity; membership is.
impl<G: Clone + Ord, V: Clone + PartialEq> PartialEq for Groups<G, V> {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl<G: Clone + Ord, V: Clone + Eq> Eq for Groups<G, V> {}
