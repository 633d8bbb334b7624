//! Integration tests for generated member naming

use propgen_extract::{
    BuiltinTypeCatalog, ContainerInfo, DeclId, Declaration, DeclarationInput, FactExtractor,
    TypeRef, naming,
};
use propgen_foundation::{DiagnosticCode, LanguageVersion, Location, OwnerKey};

fn extract_name(field: &str) -> (Option<String>, Vec<DiagnosticCode>) {
    let decl = Declaration::new(field, TypeRef::new("String"), Location::none()).observable();
    let input = DeclarationInput::new(
        DeclId(1),
        decl,
        ContainerInfo::observable(OwnerKey::class("A")).with_changing_event("PropertyChanging"),
        LanguageVersion::LATEST,
    );
    let out = FactExtractor::default().extract(&input, &BuiltinTypeCatalog);
    let name = out
        .facts
        .is_generated()
        .then(|| out.facts.property_name.to_string());
    (name, out.diagnostics.iter().map(|d| d.code).collect())
}

#[test]
fn prefixes_are_stripped() {
    assert_eq!(extract_name("_firstName").0.as_deref(), Some("FirstName"));
    assert_eq!(extract_name("m_count").0.as_deref(), Some("Count"));
    assert_eq!(extract_name("title").0.as_deref(), Some("Title"));
}

#[test]
fn same_name_is_a_collision() {
    let (name, codes) = extract_name("Title");
    assert!(name.is_none());
    assert_eq!(codes, vec![DiagnosticCode::GeneratedNameCollision]);
}

#[test]
fn event_names_are_reserved() {
    assert_eq!(
        extract_name("_propertyChanged").1,
        vec![DiagnosticCode::ReservedGeneratedName]
    );
    assert_eq!(
        extract_name("_propertyChanging").1,
        vec![DiagnosticCode::ReservedGeneratedName]
    );
}

#[test]
fn empty_remainder_is_unusable() {
    assert_eq!(extract_name("_").1, vec![DiagnosticCode::ReservedGeneratedName]);
}

#[test]
fn naming_helpers() {
    assert_eq!(naming::property_name("_x").as_deref(), Some("X"));
    assert!(naming::is_identifier("SaveCommand"));
    assert!(!naming::is_identifier("Save Command"));
}
