//! Pass orchestration.
//!
//! A pass runs the stages in a fixed order:
//!
//! ```text
//! snapshot ─▶ observable filter ─▶ extraction ─▶ generated filter ─▶ owner key
//!                                      │                                  │
//!                                 diagnostics                       group by owner
//!                                      │                                  │
//!                                      │            ┌─────────────────────┴──────┐
//!                                      │      validate + emit            pool events
//!                                      │            │                            │
//!                                      │            │                    emit aggregate
//!                                      ▼            ▼                            ▼
//!                                  sorted ◀──── resolve hint-name collisions ◀───┘
//! ```
//!
//! Every memoized stage reads the previous pass's cache from the current
//! [`PassState`]. The new state is only installed once the whole pass has
//! succeeded, so a failed or cancelled pass leaves the driver exactly as it
//! was.

use std::fmt;
use std::sync::Arc;

use propgen_emit::{
    EmittedArtifact, Emitter, EventAggregate, OwnerGroup, Template, resolve_collisions,
};
use propgen_extract::{
    BuiltinTypeCatalog, DeclId, DeclarationInput, Extraction, FactExtractor, ItemFacts,
    TypeCatalog,
};
use propgen_foundation::{Diagnostic, Error, OwnerKey, Result};
use propgen_pipeline::{Filter, Groups, Node, Pool, Rekey, Structural};
use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::config::PipelineConfig;
use crate::report::{ArtifactDelta, DiagnosticDelta, PassOutput, PassReport, PassStats};
use crate::sink::{ArtifactSink, DiagnosticSink};
use crate::snapshot::Snapshot;
use crate::state::{EmitOutcome, PassState};

// =============================================================================
// Stages
// =============================================================================

struct Stages {
    observable: Filter<DeclId, DeclarationInput>,
    extraction: Node<DeclId, DeclarationInput, Extraction>,
    generated: Filter<DeclId, ItemFacts>,
    owners: Rekey<DeclId, ItemFacts, OwnerKey>,
    emission: Node<OwnerKey, OwnerGroup, EmitOutcome>,
    events: Pool<ItemFacts, Arc<str>>,
    known_events: Node<(), EventAggregate, Option<EmittedArtifact>>,
}

impl Stages {
    fn new(config: &PipelineConfig, catalog: &Arc<dyn TypeCatalog>, emitter: &Emitter) -> Self {
        let extractor = FactExtractor::new(config.min_language_version);

        let extraction = {
            let catalog = Arc::clone(catalog);
            Node::new("extraction", move |_, input: &DeclarationInput| {
                Ok(extractor.extract(input, catalog.as_ref()))
            })
            .with_output_eq(Structural)
            .with_parallel(config.parallel)
        };

        let emission = {
            let emitter = emitter.clone();
            Node::new("emission", move |_, group: &OwnerGroup| {
                match emitter.check_group(group) {
                    Some(diagnostic) => Ok(EmitOutcome::Withheld(diagnostic)),
                    None => emitter.emit_group(group).map(EmitOutcome::Artifact),
                }
            })
            .with_output_eq(Structural)
            .with_parallel(config.parallel)
        };

        let known_events = {
            let emitter = emitter.clone();
            Node::new("known_events", move |_, aggregate: &EventAggregate| {
                emitter.emit_aggregate(aggregate)
            })
            .with_output_eq(Structural)
        };

        Self {
            observable: Filter::new("observable", |_, input: &DeclarationInput| {
                input.is_observable()
            }),
            extraction,
            generated: Filter::new("generated", |_, facts: &ItemFacts| facts.is_generated()),
            owners: Rekey::new("owners", |facts: &ItemFacts| facts.owner.clone()),
            emission,
            events: Pool::new("events", |facts: &ItemFacts| {
                facts.referenced_events().cloned().collect()
            })
            .with_parallel(config.parallel),
            known_events,
        }
    }
}

// =============================================================================
// Driver
// =============================================================================

/// Runs passes over snapshots, reusing the previous pass's work.
pub struct Driver {
    config: PipelineConfig,
    catalog: Arc<dyn TypeCatalog>,
    emitter: Emitter,
    stages: Stages,
    state: Arc<PassState>,
}

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("config", &self.config)
            .field("pass", &self.state.pass())
            .finish_non_exhaustive()
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Driver {
    /// Creates a driver with the built-in type catalog and default template.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        let catalog: Arc<dyn TypeCatalog> = Arc::new(BuiltinTypeCatalog);
        let emitter = Emitter::default();
        let stages = Stages::new(&config, &catalog, &emitter);
        Self {
            config,
            catalog,
            emitter,
            stages,
            state: PassState::initial(),
        }
    }

    /// Replaces the type catalog. Cached work is discarded.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<dyn TypeCatalog>) -> Self {
        self.catalog = catalog;
        self.rebuild()
    }

    /// Replaces the artifact template. Cached work is discarded.
    #[must_use]
    pub fn with_template(mut self, template: Arc<dyn Template>) -> Self {
        self.emitter = Emitter::new(template);
        self.rebuild()
    }

    fn rebuild(mut self) -> Self {
        self.stages = Stages::new(&self.config, &self.catalog, &self.emitter);
        self.state = PassState::initial();
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Returns the state of the last completed pass.
    #[must_use]
    pub fn state(&self) -> Arc<PassState> {
        Arc::clone(&self.state)
    }

    /// Discards all cached work; the next pass starts cold.
    pub fn reset(&mut self) {
        self.state = PassState::initial();
    }

    /// Runs one pass over `snapshot`.
    ///
    /// On success the driver's state is replaced by this pass's state.
    ///
    /// # Errors
    /// Returns [`propgen_foundation::ErrorKind::Cancelled`] if `token` was
    /// cancelled, or any error raised by a stage. Either way the previous
    /// state stays in place.
    pub fn run_pass(&mut self, snapshot: &Snapshot, token: &CancellationToken) -> Result<PassOutput> {
        let previous = Arc::clone(&self.state);
        let pass = previous.pass + 1;
        debug!(pass, declarations = snapshot.len(), "pass started");

        match self.execute(snapshot, token, &previous, pass) {
            Ok((state, output)) => {
                info!(
                    pass,
                    artifacts = output.artifacts.len(),
                    diagnostics = output.diagnostics.len(),
                    extracted = output.stats.extraction.recomputed.len(),
                    emitted = output.stats.emission.recomputed.len(),
                    "pass complete"
                );
                self.state = Arc::new(state);
                Ok(output)
            }
            Err(error) => {
                let error = in_pass(error, pass);
                if error.is_cancelled() {
                    debug!(pass, "pass cancelled");
                } else {
                    warn!(pass, %error, "pass failed");
                }
                Err(error)
            }
        }
    }

    /// Runs one pass and hands its results to the sinks.
    ///
    /// Artifacts are published once, then every diagnostic is reported.
    /// Nothing reaches either sink if the pass fails.
    ///
    /// # Errors
    /// Same as [`Driver::run_pass`].
    pub fn run_and_publish(
        &mut self,
        snapshot: &Snapshot,
        token: &CancellationToken,
        artifacts: &mut dyn ArtifactSink,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Result<PassReport> {
        let output = self.run_pass(snapshot, token)?;
        artifacts.publish(&output.artifacts);
        for diagnostic in &output.diagnostics {
            diagnostics.report(diagnostic);
        }
        Ok(output.report())
    }

    fn execute(
        &self,
        snapshot: &Snapshot,
        token: &CancellationToken,
        previous: &PassState,
        pass: u64,
    ) -> Result<(PassState, PassOutput)> {
        let stages = &self.stages;

        // Facts
        token.check()?;
        let observable = stages.observable.run(
            snapshot.iter().map(|input| (input.id, input.clone())),
            &previous.observable,
        )?;
        let extraction = stages.extraction.run(observable.items, &previous.extraction)?;
        let mut diagnostics: Vec<Diagnostic> = extraction
            .items
            .iter()
            .flat_map(|item| item.value.diagnostics.iter().cloned())
            .collect();

        token.check()?;
        let generated = stages.generated.run(
            extraction
                .items
                .iter()
                .map(|item| (item.key, item.value.facts.clone())),
            &previous.generated,
        )?;
        let owners = stages.owners.run(generated.items, &previous.owners)?;

        // Groups and pool
        let groups = Groups::from_items(
            owners
                .items
                .iter()
                .map(|(owner, _, facts)| (owner.clone(), facts.clone())),
        );
        let group_delta = groups.changed_since(&previous.groups);
        let pooled: Vec<ItemFacts> = groups.values().cloned().collect();
        let aggregate = stages.events.collect(&pooled);

        // Emission
        token.check()?;
        let emission = stages.emission.run(
            groups.iter().map(|group| (group.key.clone(), group.clone())),
            &previous.emission,
        )?;
        let known_events = stages
            .known_events
            .run(std::iter::once(((), aggregate.clone())), &previous.known_events)?;

        let mut candidates = Vec::with_capacity(emission.items.len() + 1);
        for item in &emission.items {
            match &item.value {
                EmitOutcome::Artifact(artifact) => candidates.push(artifact.clone()),
                EmitOutcome::Withheld(diagnostic) => diagnostics.push(diagnostic.clone()),
            }
        }
        candidates.extend(known_events.items.iter().filter_map(|item| item.value.clone()));

        let (artifacts, collisions) = resolve_collisions(candidates);
        diagnostics.extend(collisions);
        diagnostics.sort();

        token.check()?;
        let output = PassOutput {
            pass,
            artifact_delta: ArtifactDelta::between(&previous.artifacts, &artifacts),
            diagnostic_delta: DiagnosticDelta::between(&previous.diagnostics, &diagnostics),
            artifacts: artifacts.clone(),
            diagnostics: diagnostics.clone(),
            stats: PassStats {
                observable: observable.stats,
                extraction: extraction.stats,
                generated: generated.stats,
                owners: owners.stats,
                groups: group_delta,
                emission: emission.stats,
                known_events: known_events.stats,
            },
        };
        let state = PassState {
            pass,
            observable: observable.cache,
            extraction: extraction.cache,
            generated: generated.cache,
            owners: owners.cache,
            groups,
            emission: emission.cache,
            aggregate,
            known_events: known_events.cache,
            artifacts,
            diagnostics,
        };

        Ok((state, output))
    }
}

fn in_pass(error: Error, pass: u64) -> Error {
    let Error { kind, context } = error;
    Error::new(kind).with_context(context.unwrap_or_default().with_pass(pass))
}
