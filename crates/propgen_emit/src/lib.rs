//! Artifact emission for propgen.
//!
//! This crate provides:
//! - [`HintName`] - Deterministic, file-safe artifact identifiers
//! - [`Template`] - Pluggable text rendering, with [`ObservableTemplate`] as the default
//! - [`Emitter`] - Group and aggregate emission plus duplicate-member checks
//! - [`resolve_collisions`] - Withholding of artifacts that share a hint name
//! - [`ArtifactSet`] - Hint-name-ordered artifacts of one pass

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod artifact;
pub mod collision;
pub mod emitter;
pub mod hint;
pub mod template;

pub use artifact::{ArtifactSet, ArtifactSource, EmittedArtifact};
pub use collision::resolve_collisions;
pub use emitter::Emitter;
pub use hint::{GENERATED_SUFFIX, HintName, KNOWN_EVENTS_HINT};
pub use template::{EventAggregate, ObservableTemplate, OwnerGroup, Template};
