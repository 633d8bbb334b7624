//! Filtering and re-keying nodes.
//!
//! Both are thin specializations of [`Node`]: the predicate or key function
//! is the memoized transform, so an item whose value did not change keeps
//! its previous verdict without re-evaluation.

use std::fmt;

use propgen_foundation::Result;

use crate::equality::Equivalence;
use crate::node::{Node, NodeCache, RunStats};

// =============================================================================
// Filter
// =============================================================================

/// Cache type of a [`Filter`].
pub type FilterCache<K, V> = NodeCache<K, V, bool>;

/// Items that passed a [`Filter`], in input order.
#[derive(Clone, Debug)]
pub struct Filtered<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Retained items.
    pub items: Vec<(K, V)>,
    /// Cache to hand to the next run.
    pub cache: FilterCache<K, V>,
    /// Per-key accounting for predicate evaluation.
    pub stats: RunStats<K>,
}

/// Keeps items whose predicate holds.
pub struct Filter<K, V> {
    node: Node<K, V, bool>,
}

impl<K, V> fmt::Debug for Filter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Filter").field(&self.node).finish()
    }
}

impl<K, V> Filter<K, V>
where
    K: Clone + Ord + fmt::Debug + Send + Sync,
    V: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates a filter with the given predicate.
    pub fn new<F>(name: &'static str, predicate: F) -> Self
    where
        F: Fn(&K, &V) -> bool + Send + Sync + 'static,
    {
        Self {
            node: Node::new(name, move |k, v| Ok(predicate(k, v))),
        }
    }

    /// Replaces the input equivalence.
    #[must_use]
    pub fn with_input_eq(mut self, eq: impl Equivalence<V> + 'static) -> Self {
        self.node = self.node.with_input_eq(eq);
        self
    }

    /// Runs the filter.
    ///
    /// # Errors
    /// Returns an error if two items share a key.
    pub fn run<I>(&self, inputs: I, previous: &FilterCache<K, V>) -> Result<Filtered<K, V>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let inputs: Vec<(K, V)> = inputs.into_iter().collect();
        let run = self.node.run(inputs.iter().cloned(), previous)?;

        let items = inputs
            .into_iter()
            .zip(&run.items)
            .filter_map(|(pair, verdict)| verdict.value.then_some(pair))
            .collect();

        Ok(Filtered {
            items,
            cache: run.cache,
            stats: run.stats,
        })
    }
}

// =============================================================================
// Rekey
// =============================================================================

/// Cache type of a [`Rekey`].
pub type RekeyCache<K, V, G> = NodeCache<K, V, G>;

/// Items annotated with a derived key, in input order.
#[derive(Clone, Debug)]
pub struct Rekeyed<K, V, G>
where
    K: Clone + Ord,
    V: Clone,
    G: Clone,
{
    /// `(derived key, original key, value)` triples.
    pub items: Vec<(G, K, V)>,
    /// Cache to hand to the next run.
    pub cache: RekeyCache<K, V, G>,
    /// Per-key accounting for key derivation.
    pub stats: RunStats<K>,
}

/// Derives a new key (such as a grouping key) for every item.
pub struct Rekey<K, V, G> {
    node: Node<K, V, G>,
}

impl<K, V, G> fmt::Debug for Rekey<K, V, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rekey").field(&self.node).finish()
    }
}

impl<K, V, G> Rekey<K, V, G>
where
    K: Clone + Ord + fmt::Debug + Send + Sync,
    V: Clone + PartialEq + Send + Sync + 'static,
    G: Clone + Send + Sync,
{
    /// Creates a re-keying node.
    pub fn new<F>(name: &'static str, key_of: F) -> Self
    where
        F: Fn(&V) -> G + Send + Sync + 'static,
    {
        Self {
            node: Node::new(name, move |_, v| Ok(key_of(v))),
        }
    }

    /// Runs the node.
    ///
    /// # Errors
    /// Returns an error if two items share a key.
    pub fn run<I>(&self, inputs: I, previous: &RekeyCache<K, V, G>) -> Result<Rekeyed<K, V, G>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let inputs: Vec<(K, V)> = inputs.into_iter().collect();
        let run = self.node.run(inputs.iter().cloned(), previous)?;

        let items = inputs
            .into_iter()
            .zip(run.items)
            .map(|((key, value), derived)| (derived.value, key, value))
            .collect();

        Ok(Rekeyed {
            items,
            cache: run.cache,
            stats: run.stats,
        })
    }
}
