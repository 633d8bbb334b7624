//! propgen - Incremental, attribute-driven generator for observable properties
//!
//! This crate re-exports all layers of the propgen system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: propgen_driver     - Pass orchestration, cancellation, sinks
//! Layer 3: propgen_emit       - Hint names, templates, collision handling
//! Layer 2: propgen_pipeline   - Memoized nodes, grouping, pooling
//! Layer 1: propgen_extract    - Declaration model, fact extraction
//! Layer 0: propgen_foundation - Core types (Error, Diagnostic, OwnerKey)
//! ```

pub use propgen_driver as driver;
pub use propgen_emit as emit;
pub use propgen_extract as extract;
pub use propgen_foundation as foundation;
pub use propgen_pipeline as pipeline;
