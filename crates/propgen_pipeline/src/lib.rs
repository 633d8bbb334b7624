//! Memoized pipeline nodes, grouping, and pooling for propgen.
//!
//! This crate provides:
//! - [`Node`] - Keyed transform that reuses outputs whose inputs didn't change
//! - [`Filter`] / [`Rekey`] - Memoized predicates and key derivation
//! - [`Groups`] - Deterministic group-by-owner with change detection
//! - [`Pool`] - Deduplicated cross-owner aggregation
//! - [`Equivalence`] - Pluggable equality for cache hits

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod equality;
pub mod filter;
pub mod group;
pub mod node;
pub mod pool;

pub use equality::{ByKey, Equivalence, FnEquivalence, Structural, from_fn};
pub use filter::{Filter, FilterCache, Filtered, Rekey, RekeyCache, Rekeyed};
pub use group::{Group, GroupDelta, Groups, group_by_owner};
pub use node::{Item, ItemState, Node, NodeCache, NodeRun, RunStats, Transform};
pub use pool::{GlobalAggregate, Pool, Selector};
