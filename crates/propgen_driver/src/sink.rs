//! Output sinks.
//!
//! A successful pass publishes its artifact set exactly once and reports
//! each of its diagnostics. Failed or cancelled passes touch no sink.

use propgen_emit::ArtifactSet;
use propgen_foundation::{Diagnostic, Severity};
use tracing::{error, info, warn};

/// Receives the artifacts of each successful pass.
pub trait ArtifactSink {
    /// Replaces the published artifacts with `artifacts`.
    fn publish(&mut self, artifacts: &ArtifactSet);
}

/// Receives diagnostics.
pub trait DiagnosticSink {
    /// Reports one diagnostic.
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Keeps every publication in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryArtifactSink {
    /// Publications in order.
    pub publications: Vec<ArtifactSet>,
}

impl MemoryArtifactSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recent publication.
    #[must_use]
    pub fn latest(&self) -> Option<&ArtifactSet> {
        self.publications.last()
    }
}

impl ArtifactSink for MemoryArtifactSink {
    fn publish(&mut self, artifacts: &ArtifactSet) {
        self.publications.push(artifacts.clone());
    }
}

/// Keeps every reported diagnostic in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryDiagnosticSink {
    /// Diagnostics in report order.
    pub diagnostics: Vec<Diagnostic>,
}

impl MemoryDiagnosticSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for MemoryDiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}

/// Forwards diagnostics to `tracing` at a level matching their severity.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnosticSink;

impl DiagnosticSink for TracingDiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        let code = diagnostic.code.id();
        let location = &diagnostic.location;
        let message = &*diagnostic.message;
        match diagnostic.severity {
            Severity::Error => error!(code, %location, "{message}"),
            Severity::Warning => warn!(code, %location, "{message}"),
            Severity::Info => info!(code, %location, "{message}"),
        }
    }
}
