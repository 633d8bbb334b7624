//! Memoized pipeline nodes.
//!
//! A [`Node`] maps a keyed input sequence to a keyed output sequence through a
//! transform. Each run is handed the previous pass's [`NodeCache`]; an input
//! whose key was seen before with an equivalent value reuses the cached output
//! instead of calling the transform. The previous cache is never modified.
//! The run returns a fresh cache for the caller to swap in.
//!
//! Identity is the key, not the position: reordering inputs, or inserting one
//! in the middle, only recomputes the keys whose values actually changed.

use std::collections::BTreeSet;
use std::fmt;

use propgen_foundation::{Error, ErrorContext, KeyedMap, Result};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::equality::{Equivalence, Structural};

/// Transform run by a node on a cache miss.
pub type Transform<K, In, Out> = dyn Fn(&K, &In) -> Result<Out> + Send + Sync;

// =============================================================================
// Item State
// =============================================================================

/// How an output item relates to the previous pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemState {
    /// Input was equivalent; the cached output was reused.
    Cached,
    /// Input changed, but the recomputed output is equivalent to the old one.
    Unchanged,
    /// Input changed and the output differs.
    Modified,
    /// Key was not present in the previous pass.
    Added,
}

impl ItemState {
    /// Returns true if downstream consumers see a different value.
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Modified | Self::Added)
    }

    /// Returns true if the transform ran for this item.
    #[must_use]
    pub const fn was_recomputed(self) -> bool {
        !matches!(self, Self::Cached)
    }
}

/// One keyed output of a node run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item<K, V> {
    /// Item identity.
    pub key: K,
    /// Output value.
    pub value: V,
    /// Relation to the previous pass.
    pub state: ItemState,
}

// =============================================================================
// Cache
// =============================================================================

#[derive(Clone, Debug)]
struct Entry<In, Out> {
    input: In,
    output: Out,
}

/// The `key → (input, output)` mapping a node produced on its last run.
///
/// Cloning is O(1) and clones share structure.
#[derive(Clone, Debug)]
pub struct NodeCache<K, In, Out>
where
    K: Clone + Ord,
    In: Clone,
    Out: Clone,
{
    entries: KeyedMap<K, Entry<In, Out>>,
}

impl<K: Clone + Ord, In: Clone, Out: Clone> Default for NodeCache<K, In, Out> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Ord, In: Clone, Out: Clone> NodeCache<K, In, Out> {
    /// Creates an empty cache, as at process start.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: KeyedMap::new(),
        }
    }

    /// Returns the number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached output for a key.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&Out> {
        self.entries.get(key).map(|e| &e.output)
    }

    /// Returns the cached input for a key.
    #[must_use]
    pub fn input(&self, key: &K) -> Option<&In> {
        self.entries.get(key).map(|e| &e.input)
    }

    /// Returns true if the key is cached.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns cached keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }
}

// =============================================================================
// Run Results
// =============================================================================

/// What a run did, per key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunStats<K> {
    /// Number of items served from the cache.
    pub cached: usize,
    /// Keys whose transform ran, in input order.
    pub recomputed: Vec<K>,
    /// Number of recomputed items whose output was equivalent to before.
    pub unchanged: usize,
    /// Keys present in the previous pass but not in this one.
    pub removed: Vec<K>,
}

impl<K> Default for RunStats<K> {
    fn default() -> Self {
        Self {
            cached: 0,
            recomputed: Vec::new(),
            unchanged: 0,
            removed: Vec::new(),
        }
    }
}

impl<K: PartialEq> RunStats<K> {
    /// Returns true if the transform ran for `key`.
    #[must_use]
    pub fn was_recomputed(&self, key: &K) -> bool {
        self.recomputed.contains(key)
    }

    /// Returns true if nothing was recomputed or removed.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.recomputed.is_empty() && self.removed.is_empty()
    }
}

/// The outcome of one node run.
#[derive(Clone, Debug)]
pub struct NodeRun<K, In, Out>
where
    K: Clone + Ord,
    In: Clone,
    Out: Clone,
{
    /// Outputs in input order.
    pub items: Vec<Item<K, Out>>,
    /// Cache to hand to the next run.
    pub cache: NodeCache<K, In, Out>,
    /// Per-key accounting.
    pub stats: RunStats<K>,
}

impl<K: Clone + Ord, In: Clone, Out: Clone> NodeRun<K, In, Out> {
    /// Returns `(key, output)` pairs in input order, ready to feed another node.
    pub fn pairs(&self) -> impl Iterator<Item = (K, Out)> + '_ {
        self.items
            .iter()
            .map(|item| (item.key.clone(), item.value.clone()))
    }

    /// Returns true if any downstream-visible value changed or disappeared.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.stats.removed.is_empty() || self.items.iter().any(|i| i.state.is_changed())
    }
}

// =============================================================================
// Node
// =============================================================================

/// A memoized transform stage.
pub struct Node<K, In, Out> {
    name: &'static str,
    transform: Box<Transform<K, In, Out>>,
    input_eq: Box<dyn Equivalence<In>>,
    output_eq: Option<Box<dyn Equivalence<Out>>>,
    parallel: bool,
}

impl<K, In, Out> fmt::Debug for Node<K, In, Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("output_eq", &self.output_eq.is_some())
            .field("parallel", &self.parallel)
            .finish_non_exhaustive()
    }
}

impl<K, In, Out> Node<K, In, Out>
where
    K: Clone + Ord + fmt::Debug + Send + Sync,
    In: Clone + Send + Sync,
    Out: Clone + Send + Sync,
{
    /// Creates a node comparing inputs structurally.
    pub fn new<F>(name: &'static str, transform: F) -> Self
    where
        F: Fn(&K, &In) -> Result<Out> + Send + Sync + 'static,
        In: PartialEq + 'static,
    {
        Self {
            name,
            transform: Box::new(transform),
            input_eq: Box::new(Structural),
            output_eq: None,
            parallel: false,
        }
    }

    /// Replaces the input equivalence used for cache hits.
    #[must_use]
    pub fn with_input_eq(mut self, eq: impl Equivalence<In> + 'static) -> Self {
        self.input_eq = Box::new(eq);
        self
    }

    /// Sets an output equivalence, enabling [`ItemState::Unchanged`].
    #[must_use]
    pub fn with_output_eq(mut self, eq: impl Equivalence<Out> + 'static) -> Self {
        self.output_eq = Some(Box::new(eq));
        self
    }

    /// Runs cache misses on the rayon pool when enabled.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the node's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the node over `inputs` against the previous pass's cache.
    ///
    /// # Errors
    /// Returns an error if two inputs share a key or if the transform fails.
    /// Nothing is cached from a failed run.
    pub fn run<I>(&self, inputs: I, previous: &NodeCache<K, In, Out>) -> Result<NodeRun<K, In, Out>>
    where
        I: IntoIterator<Item = (K, In)>,
    {
        let inputs: Vec<(K, In)> = inputs.into_iter().collect();
        self.check_unique(&inputs)?;

        // Reuse outputs whose input is equivalent to last pass
        let reused: Vec<Option<Out>> = inputs
            .iter()
            .map(|(key, input)| {
                previous
                    .entries
                    .get(key)
                    .filter(|e| self.input_eq.equivalent(&e.input, input))
                    .map(|e| e.output.clone())
            })
            .collect();

        let misses: Vec<usize> = reused
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.is_none().then_some(i))
            .collect();

        let computed: Vec<Out> = if self.parallel && misses.len() > 1 {
            misses
                .par_iter()
                .map(|&i| self.apply(&inputs[i].0, &inputs[i].1))
                .collect::<Result<Vec<_>>>()?
        } else {
            misses
                .iter()
                .map(|&i| self.apply(&inputs[i].0, &inputs[i].1))
                .collect::<Result<Vec<_>>>()?
        };

        let mut computed = computed.into_iter();
        let mut stats = RunStats::default();
        let mut items = Vec::with_capacity(inputs.len());
        let mut entries = Vec::with_capacity(inputs.len());

        for ((key, input), reused) in inputs.into_iter().zip(reused) {
            let (value, state) = match reused {
                Some(output) => {
                    stats.cached += 1;
                    (output, ItemState::Cached)
                }
                None => {
                    let output = computed
                        .next()
                        .ok_or_else(|| Error::internal("fewer outputs than cache misses"))?;
                    stats.recomputed.push(key.clone());
                    self.classify(previous, &key, output, &mut stats)
                }
            };
            entries.push((
                key.clone(),
                Entry {
                    input,
                    output: value.clone(),
                },
            ));
            items.push(Item { key, value, state });
        }

        let cache = NodeCache {
            entries: entries.into_iter().collect(),
        };
        stats.removed = previous
            .keys()
            .filter(|k| !cache.contains_key(k))
            .cloned()
            .collect();

        debug!(
            node = self.name,
            cached = stats.cached,
            recomputed = stats.recomputed.len(),
            unchanged = stats.unchanged,
            removed = stats.removed.len(),
            "node run"
        );

        Ok(NodeRun {
            items,
            cache,
            stats,
        })
    }

    fn apply(&self, key: &K, input: &In) -> Result<Out> {
        trace!(node = self.name, ?key, "transform");
        (self.transform)(key, input).map_err(|e| {
            if e.context.is_some() {
                e
            } else {
                e.with_context(
                    ErrorContext::new()
                        .with_stage(self.name)
                        .with_key(format!("{key:?}")),
                )
            }
        })
    }

    fn classify(
        &self,
        previous: &NodeCache<K, In, Out>,
        key: &K,
        output: Out,
        stats: &mut RunStats<K>,
    ) -> (Out, ItemState) {
        match previous.entries.get(key) {
            Some(prev)
                if self
                    .output_eq
                    .as_ref()
                    .is_some_and(|eq| eq.equivalent(&prev.output, &output)) =>
            {
                stats.unchanged += 1;
                // Keep the old value so identical outputs stay identical downstream
                (prev.output.clone(), ItemState::Unchanged)
            }
            Some(_) => (output, ItemState::Modified),
            None => (output, ItemState::Added),
        }
    }

    fn check_unique(&self, inputs: &[(K, In)]) -> Result<()> {
        let mut seen = BTreeSet::new();
        for (key, _) in inputs {
            if !seen.insert(key) {
                return Err(Error::internal(format!("duplicate key {key:?}"))
                    .with_context(ErrorContext::new().with_stage(self.name)));
            }
        }
        Ok(())
    }
}
