//! Owner identity for containing types.
//!
//! The same logical container is re-observed on every pass, so identity is
//! structural: two keys are equal when name, arity, and kind all match.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of a containing type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OwnerKind {
    /// A reference-semantics class.
    Class,
    /// A record type.
    Record,
    /// A value-semantics struct.
    Struct,
}

impl OwnerKind {
    /// Returns the lowercase keyword for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Record => "record",
            Self::Struct => "struct",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural identity of a containing type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OwnerKey {
    /// Fully-qualified, dot-separated name (e.g. `App.Models.Person`).
    pub name: Arc<str>,
    /// Number of generic parameters.
    pub arity: u32,
    /// Kind of the type.
    pub kind: OwnerKind,
}

impl OwnerKey {
    /// Creates a new owner key.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, arity: u32, kind: OwnerKind) -> Self {
        Self {
            name: name.into(),
            arity,
            kind,
        }
    }

    /// Shorthand for a non-generic class.
    #[must_use]
    pub fn class(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, 0, OwnerKind::Class)
    }

    /// Returns the unqualified type name (last dotted segment).
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Returns the namespace portion, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(ns, _)| ns)
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)?;
        if self.arity > 0 {
            write!(f, "`{}", self.arity)?;
        }
        Ok(())
    }
}
