//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use propgen_foundation::{Error, ErrorContext, ErrorKind, LanguageVersion};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_invalid_option() {
    let err = Error::invalid_option("propgen_min_language_version", "x.y", "not a version");
    assert!(matches!(err.kind, ErrorKind::InvalidOption { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("propgen_min_language_version"));
    assert!(msg.contains("not a version"));
}

#[test]
fn error_cancelled() {
    let err = Error::cancelled();
    assert!(err.is_cancelled());
    assert_eq!(format!("{err}"), "pass cancelled");
}

#[test]
fn error_internal() {
    let err = Error::internal("duplicate key");
    assert!(!err.is_cancelled());
    assert!(format!("{err}").contains("duplicate key"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_display_skips_missing_parts() {
    let ctx = ErrorContext::new().with_stage("emission");
    assert_eq!(format!("{ctx}"), "stage emission");

    let ctx = ErrorContext::new().with_pass(2).with_key("class A");
    assert_eq!(format!("{ctx}"), "pass 2, key class A");
}

#[test]
fn context_is_optional() {
    let err = Error::template("A.g.rs", "bad");
    assert!(err.context.is_none());
    let err = err.with_context(ErrorContext::new().with_pass(1));
    assert_eq!(err.context.unwrap().pass, Some(1));
}

// =============================================================================
// Language Versions
// =============================================================================

#[test]
fn version_parse_errors_are_invalid_options() {
    let err = "v10".parse::<LanguageVersion>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidOption { .. }));
}

#[test]
fn version_gate() {
    let min: LanguageVersion = "8.0".parse().unwrap();
    assert!(LanguageVersion::new(8, 0).supports(min));
    assert!(LanguageVersion::LATEST.supports(min));
    assert!(!LanguageVersion::new(7, 3).supports(min));
    assert_eq!(min.to_string(), "8.0");
}
