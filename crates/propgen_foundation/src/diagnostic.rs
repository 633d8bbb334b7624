//! Diagnostics reported alongside generation results.
//!
//! A [`Diagnostic`] never aborts a pass. Input defects and language gating
//! are recovered locally; collision diagnostics additionally withhold the
//! artifact they concern.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::span::Location;

// =============================================================================
// Severity
// =============================================================================

/// How serious a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    /// Informational note.
    Info,
    /// Something was ignored or adjusted; generation proceeded.
    Warning,
    /// Generation for the affected item or artifact did not proceed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

// =============================================================================
// Codes
// =============================================================================

/// Which part of the error taxonomy a diagnostic belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiagnosticCategory {
    /// Malformed or unsupported declaration shape.
    Input,
    /// Language-feature version below the configured minimum.
    Gating,
    /// Two outputs resolve to the same identity. Fatal for those outputs.
    Collision,
}

/// Stable identifier for each kind of diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiagnosticCode {
    /// Language version below the configured minimum.
    LanguageVersionTooLow,
    /// The declared field type cannot back a generated property.
    UnsupportedFieldType,
    /// An attribute argument is empty, malformed, or missing.
    InvalidAttributeArgument,
    /// The generated property name equals the field name.
    GeneratedNameCollision,
    /// The generated property name is a reserved identifier.
    ReservedGeneratedName,
    /// The containing type cannot raise change notifications.
    InvalidContainingType,
    /// A property asks to notify itself.
    SelfNotification,
    /// Validation requested on a container without validation support.
    MissingValidationSupport,
    /// Broadcast requested on a container without recipient support.
    MissingRecipientSupport,
    /// Static fields cannot back instance properties.
    StaticField,
    /// Read-only fields cannot back settable properties.
    ReadOnlyField,
    /// Two members of one owner generate the same property.
    DuplicateGeneratedMember,
    /// Two artifacts resolve to the same hint name.
    HintNameCollision,
}

impl DiagnosticCode {
    /// Returns the stable `PGxxxx` identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::LanguageVersionTooLow => "PG0001",
            Self::UnsupportedFieldType => "PG0002",
            Self::InvalidAttributeArgument => "PG0003",
            Self::GeneratedNameCollision => "PG0004",
            Self::ReservedGeneratedName => "PG0005",
            Self::InvalidContainingType => "PG0006",
            Self::SelfNotification => "PG0007",
            Self::MissingValidationSupport => "PG0008",
            Self::MissingRecipientSupport => "PG0009",
            Self::StaticField => "PG0010",
            Self::ReadOnlyField => "PG0011",
            Self::DuplicateGeneratedMember => "PG0101",
            Self::HintNameCollision => "PG0102",
        }
    }

    /// Returns the severity this code is reported with.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::SelfNotification
            | Self::MissingValidationSupport
            | Self::MissingRecipientSupport => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Returns the taxonomy category.
    #[must_use]
    pub const fn category(self) -> DiagnosticCategory {
        match self {
            Self::LanguageVersionTooLow => DiagnosticCategory::Gating,
            Self::DuplicateGeneratedMember | Self::HintNameCollision => {
                DiagnosticCategory::Collision
            }
            _ => DiagnosticCategory::Input,
        }
    }

    /// Returns true if the diagnostic withholds an artifact.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self.category(), DiagnosticCategory::Collision)
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// An immutable, located finding.
///
/// Ordering is by location, then code, then message, so a sorted list of
/// diagnostics is stable across passes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// Severity of the finding.
    pub severity: Severity,
    /// Stable code.
    pub code: DiagnosticCode,
    /// Human-readable message.
    pub message: Arc<str>,
    /// Where the finding applies.
    pub location: Location,
}

impl Diagnostic {
    /// Creates a diagnostic with the code's default severity.
    #[must_use]
    pub fn new(code: DiagnosticCode, message: impl Into<Arc<str>>, location: Location) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
            location,
        }
    }

    /// Returns true if this is an error-severity diagnostic.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Returns true if this diagnostic withholds an artifact.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }
}

impl PartialOrd for Diagnostic {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Diagnostic {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.location
            .cmp(&other.location)
            .then(self.code.cmp(&other.code))
            .then_with(|| self.message.cmp(&other.message))
            .then(self.severity.cmp(&other.severity))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}: {}",
            self.location, self.severity, self.code, self.message
        )
    }
}
