//! Cross-owner pooling.
//!
//! A [`Pool`] selects zero or more values from every item and collects them
//! into one deduplicated, sorted [`GlobalAggregate`]. Because the aggregate
//! is a set, neither item order nor repetition affects it, and an edit that
//! doesn't change the set leaves downstream emission cached.

use std::fmt;

use propgen_foundation::ValueSet;
use rayon::prelude::*;
use tracing::debug;

/// A deduplicated, ordered set of pooled values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GlobalAggregate<T>
where
    T: Clone + Ord,
{
    /// Pooled values in sorted order.
    pub values: ValueSet<T>,
}

impl<T: Clone + Ord> Default for GlobalAggregate<T> {
    fn default() -> Self {
        Self {
            values: ValueSet::new(),
        }
    }
}

impl<T: Clone + Ord> GlobalAggregate<T> {
    /// Returns the number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing was pooled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates values in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T: Clone + Ord> FromIterator<T> for GlobalAggregate<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Selection function applied to each item.
pub type Selector<V, T> = dyn Fn(&V) -> Vec<T> + Send + Sync;

/// Collects values across all items into one [`GlobalAggregate`].
pub struct Pool<V, T> {
    name: &'static str,
    select: Box<Selector<V, T>>,
    parallel: bool,
}

impl<V, T> fmt::Debug for Pool<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("name", &self.name)
            .field("parallel", &self.parallel)
            .finish_non_exhaustive()
    }
}

impl<V, T> Pool<V, T>
where
    V: Sync,
    T: Clone + Ord + Send + Sync,
{
    /// Creates a pool with the given selector.
    pub fn new<F>(name: &'static str, select: F) -> Self
    where
        F: Fn(&V) -> Vec<T> + Send + Sync + 'static,
    {
        Self {
            name,
            select: Box::new(select),
            parallel: false,
        }
    }

    /// Runs selection on the rayon pool when enabled.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the pool's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Pools the selected values of every item.
    #[must_use]
    pub fn collect(&self, items: &[V]) -> GlobalAggregate<T> {
        let values = if self.parallel {
            items
                .par_iter()
                .fold(ValueSet::new, |acc, item| self.absorb(acc, item))
                .reduce(ValueSet::new, |a, b| a.union(&b))
        } else {
            items
                .iter()
                .fold(ValueSet::new(), |acc, item| self.absorb(acc, item))
        };

        debug!(pool = self.name, items = items.len(), values = values.len(), "pooled");
        GlobalAggregate { values }
    }

    fn absorb(&self, acc: ValueSet<T>, item: &V) -> ValueSet<T> {
        (self.select)(item)
            .into_iter()
            .fold(acc, |set, value| set.insert(value))
    }
}
