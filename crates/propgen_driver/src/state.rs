//! Retained state of the last completed pass.
//!
//! A [`PassState`] is immutable once built. The driver holds the current
//! one behind an `Arc`, reads it during the next pass, and replaces it only
//! when that pass completes.

use std::sync::Arc;

use propgen_emit::{ArtifactSet, EmittedArtifact, EventAggregate, OwnerGroup};
use propgen_extract::{DeclId, DeclarationInput, Extraction, ItemFacts};
use propgen_foundation::{Diagnostic, OwnerKey};
use propgen_pipeline::{FilterCache, Groups, NodeCache, RekeyCache};

/// What emission produced for one owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmitOutcome {
    /// The owner's artifact, pending collision resolution.
    Artifact(EmittedArtifact),
    /// The owner failed validation; nothing is published for it.
    Withheld(Diagnostic),
}

/// Node caches and published results of one pass.
#[derive(Clone, Debug, Default)]
pub struct PassState {
    pub(crate) pass: u64,
    pub(crate) observable: FilterCache<DeclId, DeclarationInput>,
    pub(crate) extraction: NodeCache<DeclId, DeclarationInput, Extraction>,
    pub(crate) generated: FilterCache<DeclId, ItemFacts>,
    pub(crate) owners: RekeyCache<DeclId, ItemFacts, OwnerKey>,
    pub(crate) groups: Groups<OwnerKey, ItemFacts>,
    pub(crate) emission: NodeCache<OwnerKey, OwnerGroup, EmitOutcome>,
    pub(crate) aggregate: EventAggregate,
    pub(crate) known_events: NodeCache<(), EventAggregate, Option<EmittedArtifact>>,
    pub(crate) artifacts: ArtifactSet,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl PassState {
    /// The state before any pass has run.
    #[must_use]
    pub fn initial() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of the pass that produced this state; 0 before the first pass.
    #[must_use]
    pub fn pass(&self) -> u64 {
        self.pass
    }

    /// Owner groups of the pass.
    #[must_use]
    pub fn groups(&self) -> &Groups<OwnerKey, ItemFacts> {
        &self.groups
    }

    /// Event names pooled across all owners.
    #[must_use]
    pub fn aggregate(&self) -> &EventAggregate {
        &self.aggregate
    }

    /// Artifacts the pass published.
    #[must_use]
    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    /// Diagnostics the pass reported, sorted.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Extraction result cached for a declaration.
    #[must_use]
    pub fn extraction(&self, id: DeclId) -> Option<&Extraction> {
        self.extraction.get(&id)
    }
}
