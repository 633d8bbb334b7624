//! Integration tests for FactExtractor

use std::sync::Arc;

use propgen_extract::{
    Attribute, BuiltinTypeCatalog, ContainerInfo, DeclId, Declaration, DeclarationInput,
    Extraction, FactExtractor, Modifiers, TypeCatalog, TypeClass, TypeRef, attributes,
};
use propgen_foundation::{DiagnosticCode, LanguageVersion, Location, OwnerKey, Span};

fn field(name: &str, ty: &str) -> Declaration {
    Declaration::new(
        name,
        TypeRef::new(ty),
        Location::new("models/person.rs", Span::new(40, 52, 4, 9)),
    )
    .observable()
}

fn input(decl: Declaration, container: ContainerInfo) -> DeclarationInput {
    DeclarationInput::new(DeclId(7), decl, container, LanguageVersion::new(10, 0))
}

fn person() -> ContainerInfo {
    ContainerInfo::observable(OwnerKey::class("App.Person"))
}

fn extract(input: &DeclarationInput) -> Extraction {
    FactExtractor::default().extract(input, &BuiltinTypeCatalog)
}

fn codes(out: &Extraction) -> Vec<DiagnosticCode> {
    out.diagnostics.iter().map(|d| d.code).collect()
}

// =============================================================================
// Well-formed Declarations
// =============================================================================

#[test]
fn plain_field_produces_facts() {
    let out = extract(&input(field("_firstName", "String"), person()));

    assert!(out.diagnostics.is_empty());
    assert!(out.facts.is_generated());
    assert_eq!(&*out.facts.property_name, "FirstName");
    assert_eq!(&*out.facts.type_name, "String");
    assert!(!out.facts.is_value_type);
    assert_eq!(out.facts.owner, OwnerKey::class("App.Person"));
}

#[test]
fn extraction_is_pure() {
    let inp = input(field("_age", "u32"), person());
    assert_eq!(extract(&inp), extract(&inp.clone()));
}

#[test]
fn facts_ignore_location() {
    let a = input(field("_age", "u32"), person());
    let mut b = a.clone();
    b.declaration.location = Location::new("elsewhere.rs", Span::at_start());

    assert_eq!(extract(&a).facts, extract(&b).facts);
}

#[test]
fn notify_attributes_are_collected_in_order() {
    let decl = field("_first", "String")
        .with_attribute(Attribute::with_args(
            attributes::NOTIFY_PROPERTY_CHANGED_FOR,
            ["FullName", "Initials", "FullName"],
        ))
        .with_attribute(Attribute::with_args(
            attributes::NOTIFY_CAN_EXECUTE_CHANGED_FOR,
            ["SaveCommand"],
        ));
    let out = extract(&input(decl, person()));

    let also: Vec<&str> = out.facts.also_notify.iter().map(|s| &**s).collect();
    assert_eq!(also, vec!["FullName", "Initials"]);
    assert_eq!(out.facts.notify_commands.len(), 1);
    assert!(out.diagnostics.is_empty());
}

// =============================================================================
// Input Defects
// =============================================================================

#[test]
fn defects_are_located_at_the_declaration() {
    let out = extract(&input(field("_p", "*const u8"), person()));

    assert_eq!(codes(&out), vec![DiagnosticCode::UnsupportedFieldType]);
    let first = out.diagnostics.first().unwrap();
    assert_eq!(first.location.span.line, 4);
    assert!(!out.facts.is_generated());
}

#[test]
fn non_notifying_container_is_rejected() {
    let container = ContainerInfo::plain(OwnerKey::class("App.Plain"));
    let out = extract(&input(field("_x", "u32"), container));
    assert!(codes(&out).contains(&DiagnosticCode::InvalidContainingType));
    assert!(out.facts.suppressed);
}

#[test]
fn event_names_must_be_identifiers() {
    let container = ContainerInfo::observable(OwnerKey::class("App.Person"))
        .with_changed_event("Property Changed");
    let out = extract(&input(field("_x", "u32"), container));

    assert_eq!(codes(&out), vec![DiagnosticCode::InvalidContainingType]);
    assert!(out.diagnostics.first().unwrap().message.contains("\"Property Changed\""));
    assert!(!out.facts.is_generated());
}

#[test]
fn self_notification_is_a_warning() {
    let decl = field("_name", "String").with_attribute(Attribute::with_args(
        attributes::NOTIFY_PROPERTY_CHANGED_FOR,
        ["Name"],
    ));
    let out = extract(&input(decl, person()));

    assert_eq!(codes(&out), vec![DiagnosticCode::SelfNotification]);
    assert!(out.facts.is_generated());
    assert!(out.facts.also_notify.is_empty());
}

#[test]
fn missing_support_flags_are_dropped() {
    let decl = field("_name", "String")
        .with_attribute(Attribute::new(attributes::NOTIFY_DATA_ERROR_INFO))
        .with_attribute(Attribute::new(attributes::NOTIFY_PROPERTY_CHANGED_RECIPIENTS));
    let out = extract(&input(decl, person()));

    assert_eq!(
        codes(&out),
        vec![
            DiagnosticCode::MissingValidationSupport,
            DiagnosticCode::MissingRecipientSupport
        ]
    );
    assert!(!out.facts.validates);
    assert!(!out.facts.broadcasts);
    assert!(out.facts.is_generated());
}

#[test]
fn supported_flags_are_kept() {
    let decl = field("_name", "String")
        .with_attribute(Attribute::new(attributes::NOTIFY_DATA_ERROR_INFO))
        .with_attribute(Attribute::new(attributes::NOTIFY_PROPERTY_CHANGED_RECIPIENTS));
    let container = person().with_validation().with_recipients();
    let out = extract(&input(decl, container));

    assert!(out.facts.validates);
    assert!(out.facts.broadcasts);
}

#[test]
fn modifiers_are_reported_together() {
    let decl = field("_count", "u32").with_modifiers(Modifiers {
        is_static: true,
        is_readonly: true,
    });
    let out = extract(&input(decl, person()));

    assert_eq!(
        codes(&out),
        vec![DiagnosticCode::StaticField, DiagnosticCode::ReadOnlyField]
    );
    assert!(out.has_errors());
    assert!(!out.facts.is_generated());
}

#[test]
fn invalid_attribute_arguments() {
    let decl = field("_first", "String")
        .with_attribute(Attribute::with_args(
            attributes::NOTIFY_PROPERTY_CHANGED_FOR,
            ["FullName", "not a name"],
        ))
        .with_attribute(Attribute::new(attributes::NOTIFY_CAN_EXECUTE_CHANGED_FOR));
    let out = extract(&input(decl, person()));

    assert_eq!(
        codes(&out),
        vec![
            DiagnosticCode::InvalidAttributeArgument,
            DiagnosticCode::InvalidAttributeArgument
        ]
    );
    // The valid argument is still kept for the best-effort facts
    assert_eq!(out.facts.also_notify.len(), 1);
    assert!(out.facts.suppressed);
}

#[test]
fn language_gate_skips_extraction() {
    let inp = DeclarationInput::new(
        DeclId(1),
        field("_p", "*const u8"),
        person(),
        LanguageVersion::new(7, 3),
    );
    let out = FactExtractor::new(LanguageVersion::new(8, 0)).extract(&inp, &BuiltinTypeCatalog);

    // Only the gate is reported; the bad type is never looked at
    assert_eq!(codes(&out), vec![DiagnosticCode::LanguageVersionTooLow]);
    assert!(out.facts.suppressed);
}

// =============================================================================
// Type Catalog
// =============================================================================

struct OnlyStrings;

impl TypeCatalog for OnlyStrings {
    fn classify(&self, ty: &TypeRef) -> TypeClass {
        if &*ty.name == "String" {
            TypeClass::Reference
        } else {
            TypeClass::Unsupported {
                reason: Arc::from("only strings are allowed here"),
            }
        }
    }
}

#[test]
fn custom_catalog_is_consulted() {
    let out = FactExtractor::default().extract(&input(field("_n", "u32"), person()), &OnlyStrings);
    assert_eq!(codes(&out), vec![DiagnosticCode::UnsupportedFieldType]);
    assert!(out.diagnostics.first().unwrap().message.contains("only strings"));
}

#[test]
fn builtin_catalog_classifies_scalars() {
    assert!(BuiltinTypeCatalog.classify(&TypeRef::new("u64")).is_value());
    assert_eq!(
        BuiltinTypeCatalog.classify(&TypeRef::new("Vec<String>")),
        TypeClass::Reference
    );
    assert!(matches!(
        BuiltinTypeCatalog.classify(&TypeRef::new("&str")),
        TypeClass::Unsupported { .. }
    ));
}
