//! Emitted artifacts and the per-pass artifact set.

use std::fmt;
use std::sync::Arc;

use propgen_foundation::{KeyedMap, OwnerKey};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hint::HintName;

/// What an artifact was generated from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ArtifactSource {
    /// One owner's group of items.
    Owner(OwnerKey),
    /// The pooled cross-owner aggregate.
    Aggregate,
}

impl fmt::Display for ArtifactSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner(owner) => write!(f, "{owner}"),
            Self::Aggregate => write!(f, "known events"),
        }
    }
}

/// One generated source text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmittedArtifact {
    /// Publication identifier.
    pub hint_name: HintName,
    /// What it was generated from.
    pub source: ArtifactSource,
    /// Generated text.
    pub text: Arc<str>,
}

impl EmittedArtifact {
    /// Creates an artifact.
    #[must_use]
    pub fn new(hint_name: HintName, source: ArtifactSource, text: impl Into<Arc<str>>) -> Self {
        Self {
            hint_name,
            source,
            text: text.into(),
        }
    }
}

/// The artifacts published by one pass, ordered by hint name.
///
/// Hint names are unique within a set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: KeyedMap<HintName, EmittedArtifact>,
}

impl ArtifactSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of artifacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Returns the artifact with the given hint name.
    #[must_use]
    pub fn get(&self, hint_name: &str) -> Option<&EmittedArtifact> {
        self.artifacts.get(&HintName::from_raw(hint_name))
    }

    /// Returns true if an artifact with this hint name exists.
    #[must_use]
    pub fn contains(&self, hint_name: &str) -> bool {
        self.get(hint_name).is_some()
    }

    /// Iterates artifacts in hint-name order.
    pub fn iter(&self) -> impl Iterator<Item = &EmittedArtifact> {
        self.artifacts.values()
    }

    /// Iterates hint names in order.
    pub fn hint_names(&self) -> impl Iterator<Item = &HintName> {
        self.artifacts.keys()
    }

    /// Hint names present here but not in `other`.
    #[must_use]
    pub fn missing_from(&self, other: &Self) -> Vec<HintName> {
        self.hint_names()
            .filter(|h| !other.artifacts.contains_key(h))
            .cloned()
            .collect()
    }

    /// Hint names present in both sets whose text differs.
    #[must_use]
    pub fn changed_from(&self, other: &Self) -> Vec<HintName> {
        self.iter()
            .filter(|a| {
                other
                    .artifacts
                    .get(&a.hint_name)
                    .is_some_and(|o| o.text != a.text)
            })
            .map(|a| a.hint_name.clone())
            .collect()
    }

    pub(crate) fn from_unique(artifacts: impl IntoIterator<Item = EmittedArtifact>) -> Self {
        Self {
            artifacts: artifacts
                .into_iter()
                .map(|a| (a.hint_name.clone(), a))
                .collect(),
        }
    }
}
