//! Artifact hint names.
//!
//! A hint name is the stable identifier under which an artifact is
//! published. It is derived from the owner's structural identity only, so
//! the same owner always maps to the same file across passes.

use std::fmt;
use std::sync::Arc;

use propgen_foundation::OwnerKey;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Suffix shared by every generated artifact.
pub const GENERATED_SUFFIX: &str = ".g.rs";

/// Hint name of the pooled event-name artifact.
pub const KNOWN_EVENTS_HINT: &str = "__KnownEvents.g.rs";

/// Stable, file-name-safe identifier of an artifact.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HintName(Arc<str>);

impl HintName {
    /// Derives the hint name of an owner's artifact.
    ///
    /// Dotted segments are kept, every other character outside
    /// `[A-Za-z0-9_]` becomes `_`, and generic owners get an `_{arity}`
    /// suffix. The owner kind does not participate, so a class and a struct
    /// with the same name collide.
    #[must_use]
    pub fn for_owner(owner: &OwnerKey) -> Self {
        let mut name: String = owner
            .name
            .chars()
            .map(|c| {
                if c == '.' || c == '_' || c.is_ascii_alphanumeric() {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if owner.arity > 0 {
            name.push('_');
            name.push_str(&owner.arity.to_string());
        }
        name.push_str(GENERATED_SUFFIX);
        Self(Arc::from(name))
    }

    /// The fixed hint name of the pooled event-name artifact.
    #[must_use]
    pub fn known_events() -> Self {
        Self(Arc::from(KNOWN_EVENTS_HINT))
    }

    pub(crate) fn from_raw(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Returns the hint name as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HintName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HintName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
