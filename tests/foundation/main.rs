//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Error, Diagnostic, OwnerKey, LanguageVersion, and
//! persistent collections.

mod collections;
mod errors;
