//! Core types, diagnostics, and persistent collections for propgen.
//!
//! This crate provides:
//! - [`Error`] - Rich error types for pass-aborting failures
//! - [`Diagnostic`] - Non-blocking, located findings reported to a sink
//! - [`OwnerKey`] - Structural identity of a containing type
//! - [`LanguageVersion`] - Ordered language-feature versions for gating
//! - [`Span`] / [`Location`] - Source positions
//! - Persistent collections ([`Seq`], [`ValueSet`], [`KeyedMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod diagnostic;
pub mod error;
pub mod owner;
pub mod span;
pub mod version;

pub use collections::{KeyedMap, Seq, ValueSet};
pub use diagnostic::{Diagnostic, DiagnosticCategory, DiagnosticCode, Severity};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use owner::{OwnerKey, OwnerKind};
pub use span::{Location, Span};
pub use version::LanguageVersion;
