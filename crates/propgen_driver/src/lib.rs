//! Pass orchestration for propgen.
//!
//! This crate provides:
//! - [`Driver`] - Runs memoized passes and swaps in their state on success
//! - [`PipelineConfig`] - Language gating and parallelism settings
//! - [`CancellationToken`] - Cooperative cancellation of superseded passes
//! - [`ArtifactSink`] / [`DiagnosticSink`] - Where pass results go
//! - [`PassReport`] - Per-stage accounting and publication deltas

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cancel;
pub mod config;
pub mod driver;
pub mod report;
pub mod sink;
pub mod snapshot;
pub mod state;

pub use cancel::CancellationToken;
pub use config::{MIN_LANGUAGE_VERSION_OPTION, PipelineConfig};
pub use driver::Driver;
pub use report::{ArtifactDelta, DiagnosticDelta, PassOutput, PassReport, PassStats};
pub use sink::{
    ArtifactSink, DiagnosticSink, MemoryArtifactSink, MemoryDiagnosticSink, TracingDiagnosticSink,
};
pub use snapshot::Snapshot;
pub use state::{EmitOutcome, PassState};
