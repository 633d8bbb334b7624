//! Group and aggregate emission.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use propgen_foundation::{Diagnostic, DiagnosticCode, Location, Result};
use tracing::trace;

use crate::artifact::{ArtifactSource, EmittedArtifact};
use crate::hint::HintName;
use crate::template::{EventAggregate, ObservableTemplate, OwnerGroup, Template};

/// Renders groups and aggregates through a [`Template`].
#[derive(Clone)]
pub struct Emitter {
    template: Arc<dyn Template>,
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter").finish_non_exhaustive()
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(Arc::new(ObservableTemplate))
    }
}

impl Emitter {
    /// Creates an emitter using the given template.
    #[must_use]
    pub fn new(template: Arc<dyn Template>) -> Self {
        Self { template }
    }

    /// Checks that no two members of a group generate the same property.
    ///
    /// Returns a fatal [`DiagnosticCode::DuplicateGeneratedMember`] naming
    /// every duplicated property and the fields behind it. The caller must
    /// withhold the owner's artifact.
    #[must_use]
    pub fn check_group(&self, group: &OwnerGroup) -> Option<Diagnostic> {
        let mut fields: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for item in group.items.iter().filter(|i| i.is_generated()) {
            fields
                .entry(&*item.property_name)
                .or_default()
                .push(&*item.field_name);
        }

        let duplicates: Vec<String> = fields
            .iter()
            .filter(|(_, fields)| fields.len() > 1)
            .map(|(prop, fields)| format!("`{prop}` (from {})", fields.join(", ")))
            .collect();
        if duplicates.is_empty() {
            return None;
        }

        Some(Diagnostic::new(
            DiagnosticCode::DuplicateGeneratedMember,
            format!(
                "{} would generate duplicate members: {}",
                group.key,
                duplicates.join("; ")
            ),
            Location::none(),
        ))
    }

    /// Renders one owner's artifact.
    ///
    /// # Errors
    /// Returns an error if the template fails.
    pub fn emit_group(&self, group: &OwnerGroup) -> Result<EmittedArtifact> {
        let hint_name = HintName::for_owner(&group.key);
        trace!(hint = %hint_name, members = group.len(), "emit group");
        let text = self.template.render_group(group)?;
        Ok(EmittedArtifact::new(
            hint_name,
            ArtifactSource::Owner(group.key.clone()),
            text,
        ))
    }

    /// Renders the pooled aggregate, or nothing if it is empty.
    ///
    /// # Errors
    /// Returns an error if the template fails.
    pub fn emit_aggregate(&self, aggregate: &EventAggregate) -> Result<Option<EmittedArtifact>> {
        if aggregate.is_empty() {
            return Ok(None);
        }
        trace!(values = aggregate.len(), "emit aggregate");
        let text = self.template.render_aggregate(aggregate)?;
        Ok(Some(EmittedArtifact::new(
            HintName::known_events(),
            ArtifactSource::Aggregate,
            text,
        )))
    }
}
