//! Duplicate members and hint-name collisions

use propgen_driver::{Driver, Snapshot};
use propgen_extract::ContainerInfo;
use propgen_foundation::{DiagnosticCode, OwnerKey, OwnerKind};

use crate::{container, field, hint_names, pass};

#[test]
fn duplicate_member_withholds_only_its_owner() {
    let a = container("A");
    let b = container("B");
    let snapshot = Snapshot::from(vec![
        field(1, &a, "_name", "String"),
        field(2, &a, "m_name", "String"),
        field(3, &b, "_name", "String"),
    ]);
    let out = pass(&mut Driver::default(), &snapshot);

    assert_eq!(hint_names(&out), vec!["B.g.rs", "__KnownEvents.g.rs"]);
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].code, DiagnosticCode::DuplicateGeneratedMember);
}

#[test]
fn fixing_the_duplicate_resolves_the_diagnostic() {
    let a = container("A");
    let mut driver = Driver::default();
    pass(
        &mut driver,
        &Snapshot::from(vec![field(1, &a, "_name", "String"), field(2, &a, "m_name", "String")]),
    );

    let out = pass(
        &mut driver,
        &Snapshot::from(vec![field(1, &a, "_name", "String"), field(2, &a, "m_title", "String")]),
    );

    assert!(out.diagnostics.is_empty());
    assert_eq!(out.diagnostic_delta.resolved.len(), 1);
    assert!(out.artifacts.contains("A.g.rs"));
}

#[test]
fn hint_collision_withholds_both_owners() {
    let generic = ContainerInfo::observable(OwnerKey::new("Foo", 1, OwnerKind::Class));
    let named = container("Foo_1");
    let other = container("Bar");
    let snapshot = Snapshot::from(vec![
        field(1, &generic, "_a", "i32"),
        field(2, &named, "_b", "i32"),
        field(3, &other, "_c", "i32"),
    ]);
    let out = pass(&mut Driver::default(), &snapshot);

    assert_eq!(hint_names(&out), vec!["Bar.g.rs", "__KnownEvents.g.rs"]);
    let codes: Vec<DiagnosticCode> = out.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![DiagnosticCode::HintNameCollision]);
}

#[test]
fn kind_does_not_separate_hint_names() {
    let class = container("Shape");
    let record = ContainerInfo::observable(OwnerKey::new("Shape", 0, OwnerKind::Record));
    let snapshot = Snapshot::from(vec![field(1, &class, "_w", "f64"), field(2, &record, "_h", "f64")]);
    let out = pass(&mut Driver::default(), &snapshot);

    assert!(!out.artifacts.contains("Shape.g.rs"));
    assert!(out.diagnostics[0].message.contains("record Shape"));
}

#[test]
fn input_defects_suppress_only_the_item() {
    let a = container("A");
    let snapshot = Snapshot::from(vec![
        field(1, &a, "_ok", "String"),
        field(2, &a, "_ptr", "*mut u8"),
    ]);
    let out = pass(&mut Driver::default(), &snapshot);

    let a_text = &out.artifacts.get("A.g.rs").unwrap().text;
    assert!(a_text.contains("pub fn Ok(&self)"));
    assert!(!a_text.contains("Ptr"));
    assert_eq!(out.diagnostics[0].code, DiagnosticCode::UnsupportedFieldType);
}
