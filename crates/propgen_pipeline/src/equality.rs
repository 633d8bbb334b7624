//! Equality capability for memoization.
//!
//! A node decides whether a cached output can be reused by asking an
//! [`Equivalence`] whether this pass's input matches the previous one.
//! Getting this wrong either recomputes everything or serves stale output,
//! so every implementation must be an equivalence relation.

use std::marker::PhantomData;

/// Decides whether two values are interchangeable for caching purposes.
pub trait Equivalence<T: ?Sized>: Send + Sync {
    /// Returns true if `a` and `b` are equivalent.
    fn equivalent(&self, a: &T, b: &T) -> bool;
}

/// Plain structural equality via [`PartialEq`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Structural;

impl<T: PartialEq + ?Sized> Equivalence<T> for Structural {
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Equality of a projected key.
///
/// Two values are equivalent when `project` maps them to equal keys.
pub struct ByKey<T: ?Sized, K, F> {
    project: F,
    _marker: PhantomData<fn(&T) -> K>,
}

impl<T: ?Sized, K, F> ByKey<T, K, F>
where
    K: PartialEq,
    F: Fn(&T) -> K + Send + Sync,
{
    /// Creates a projection-based equivalence.
    pub fn new(project: F) -> Self {
        Self {
            project,
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized, K, F> Equivalence<T> for ByKey<T, K, F>
where
    K: PartialEq,
    F: Fn(&T) -> K + Send + Sync,
{
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (self.project)(a) == (self.project)(b)
    }
}

/// Equivalence given by an arbitrary comparison function.
pub struct FnEquivalence<F>(F);

impl<T: ?Sized, F> Equivalence<T> for FnEquivalence<F>
where
    F: Fn(&T, &T) -> bool + Send + Sync,
{
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b)
    }
}

/// Wraps a comparison function as an [`Equivalence`].
pub fn from_fn<T: ?Sized, F>(f: F) -> FnEquivalence<F>
where
    F: Fn(&T, &T) -> bool + Send + Sync,
{
    FnEquivalence(f)
}
