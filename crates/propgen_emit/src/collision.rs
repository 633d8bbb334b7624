//! Hint-name collision resolution.
//!
//! Two distinct sources can sanitize to the same hint name. Publishing
//! either one would silently shadow the other, so every colliding artifact
//! is withheld and one fatal diagnostic is reported per hint name.

use std::collections::BTreeMap;

use propgen_foundation::{Diagnostic, DiagnosticCode, Location};
use tracing::warn;

use crate::artifact::{ArtifactSet, EmittedArtifact};
use crate::hint::HintName;

/// Splits artifacts into a publishable set and collision diagnostics.
///
/// Diagnostics come out in hint-name order.
#[must_use]
pub fn resolve_collisions<I>(artifacts: I) -> (ArtifactSet, Vec<Diagnostic>)
where
    I: IntoIterator<Item = EmittedArtifact>,
{
    let mut by_hint: BTreeMap<HintName, Vec<EmittedArtifact>> = BTreeMap::new();
    for artifact in artifacts {
        by_hint
            .entry(artifact.hint_name.clone())
            .or_default()
            .push(artifact);
    }

    let mut unique = Vec::with_capacity(by_hint.len());
    let mut diagnostics = Vec::new();

    for (hint, mut group) in by_hint {
        if group.len() == 1 {
            unique.extend(group.pop());
            continue;
        }

        let mut sources: Vec<String> = group.iter().map(|a| a.source.to_string()).collect();
        sources.sort();
        warn!(hint = %hint, count = group.len(), "hint name collision");
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::HintNameCollision,
            format!(
                "{} sources map to hint name `{hint}`: {}; none of them is published",
                group.len(),
                sources.join(", ")
            ),
            Location::none(),
        ));
    }

    (ArtifactSet::from_unique(unique), diagnostics)
}
