//! Pass outputs and reports.

use propgen_emit::{ArtifactSet, HintName};
use propgen_extract::DeclId;
use propgen_foundation::{Diagnostic, OwnerKey};
use propgen_pipeline::{GroupDelta, RunStats};

/// Per-stage accounting for one pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassStats {
    /// Attribute-presence filter.
    pub observable: RunStats<DeclId>,
    /// Fact extraction.
    pub extraction: RunStats<DeclId>,
    /// Suppressed-facts filter.
    pub generated: RunStats<DeclId>,
    /// Owner key derivation.
    pub owners: RunStats<DeclId>,
    /// Owner groups compared with the previous pass.
    pub groups: GroupDelta<OwnerKey>,
    /// Per-owner validation and emission.
    pub emission: RunStats<OwnerKey>,
    /// Aggregate emission.
    pub known_events: RunStats<()>,
}

impl PassStats {
    /// Returns true if no stage recomputed or dropped anything.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.observable.is_quiet()
            && self.extraction.is_quiet()
            && self.generated.is_quiet()
            && self.owners.is_quiet()
            && self.groups.is_empty()
            && self.emission.is_quiet()
            && self.known_events.is_quiet()
    }
}

/// How the published artifacts changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtifactDelta {
    /// Hint names published for the first time.
    pub added: Vec<HintName>,
    /// Hint names whose text changed.
    pub changed: Vec<HintName>,
    /// Hint names no longer published.
    pub removed: Vec<HintName>,
}

impl ArtifactDelta {
    /// Compares two publications.
    #[must_use]
    pub fn between(previous: &ArtifactSet, current: &ArtifactSet) -> Self {
        Self {
            added: current.missing_from(previous),
            changed: current.changed_from(previous),
            removed: previous.missing_from(current),
        }
    }

    /// Returns true if the publication is unchanged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty() && self.removed.is_empty()
    }
}

/// How the reported diagnostics changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagnosticDelta {
    /// Diagnostics new in this pass.
    pub added: Vec<Diagnostic>,
    /// Diagnostics from the previous pass that no longer apply.
    pub resolved: Vec<Diagnostic>,
}

impl DiagnosticDelta {
    /// Compares two sorted diagnostic lists.
    #[must_use]
    pub fn between(previous: &[Diagnostic], current: &[Diagnostic]) -> Self {
        Self {
            added: sorted_difference(current, previous),
            resolved: sorted_difference(previous, current),
        }
    }

    /// Returns true if the diagnostics are unchanged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.resolved.is_empty()
    }
}

/// Multiset difference `a - b` of two sorted lists.
///
/// Identical diagnostics can repeat, so each occurrence in `b` cancels at
/// most one occurrence in `a`.
fn sorted_difference(a: &[Diagnostic], b: &[Diagnostic]) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut rest = b.iter().peekable();
    for d in a {
        while rest.next_if(|other| *other < d).is_some() {}
        if rest.next_if(|other| *other == d).is_none() {
            out.push(d.clone());
        }
    }
    out
}

/// Everything a completed pass produced.
#[derive(Clone, Debug)]
pub struct PassOutput {
    /// Pass number, starting at 1.
    pub pass: u64,
    /// Artifacts to publish, ordered by hint name.
    pub artifacts: ArtifactSet,
    /// Diagnostics to report, sorted.
    pub diagnostics: Vec<Diagnostic>,
    /// Changes to the publication since the previous pass.
    pub artifact_delta: ArtifactDelta,
    /// Changes to the diagnostics since the previous pass.
    pub diagnostic_delta: DiagnosticDelta,
    /// Per-stage accounting.
    pub stats: PassStats,
}

impl PassOutput {
    /// Summarizes the pass without the artifact texts.
    #[must_use]
    pub fn report(&self) -> PassReport {
        PassReport {
            pass: self.pass,
            published: self.artifacts.len(),
            reported: self.diagnostics.len(),
            artifacts: self.artifact_delta.clone(),
            diagnostics: self.diagnostic_delta.clone(),
            stats: self.stats.clone(),
        }
    }
}

/// Summary of a published pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassReport {
    /// Pass number, starting at 1.
    pub pass: u64,
    /// Number of artifacts published.
    pub published: usize,
    /// Number of diagnostics reported.
    pub reported: usize,
    /// Changes to the publication.
    pub artifacts: ArtifactDelta,
    /// Changes to the diagnostics.
    pub diagnostics: DiagnosticDelta,
    /// Per-stage accounting.
    pub stats: PassStats,
}
