//! Pass-to-pass reuse

use propgen_driver::{Driver, PipelineConfig, Snapshot};
use propgen_extract::{Attribute, ContainerInfo, DeclId, DeclarationInput, attributes};
use propgen_foundation::DiagnosticCode;
use propgen_foundation::OwnerKey;

use crate::{container, field, field_with, hint_names, pass};

fn inputs() -> Vec<DeclarationInput> {
    let a = container("App.A");
    let b = container("App.B");
    vec![
        field(1, &a, "_first", "String"),
        field(2, &a, "_last", "String"),
        field(3, &b, "_count", "u32"),
    ]
}

fn snapshot() -> Snapshot {
    Snapshot::from(inputs())
}

/// The base snapshot with the declaration of the same id replaced.
fn edited(input: DeclarationInput) -> Snapshot {
    inputs()
        .into_iter()
        .map(|old| if old.id == input.id { input.clone() } else { old })
        .collect()
}

#[test]
fn rerun_is_idempotent() {
    let mut driver = Driver::default();
    let first = pass(&mut driver, &snapshot());
    let second = pass(&mut driver, &snapshot());

    assert_eq!(first.artifacts, second.artifacts);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert!(second.stats.is_quiet());
    assert_eq!(second.stats.extraction.cached, 3);
    assert_eq!(second.stats.emission.cached, 2);
    assert_eq!(second.pass, 2);
}

#[test]
fn editing_one_field_recomputes_only_its_owner() {
    let mut driver = Driver::default();
    pass(&mut driver, &snapshot());

    let a = container("App.A");
    let out = pass(&mut driver, &edited(field(2, &a, "_surname", "String")));

    assert_eq!(out.stats.extraction.recomputed, vec![DeclId(2)]);
    assert_eq!(out.stats.emission.recomputed, vec![OwnerKey::class("App.A")]);
    assert_eq!(out.stats.emission.cached, 1);
    assert!(out.stats.known_events.is_quiet());

    let changed: Vec<String> = out.artifact_delta.changed.iter().map(ToString::to_string).collect();
    assert_eq!(changed, vec!["App.A.g.rs"]);
}

#[test]
fn moving_a_declaration_does_not_reemit() {
    let mut driver = Driver::default();
    pass(&mut driver, &snapshot());

    let a = container("App.A");
    let mut moved = field(1, &a, "_first", "String");
    moved.declaration.location.span.line = 40;
    let out = pass(&mut driver, &edited(moved));

    // Extraction reruns, but its facts are equivalent to last pass
    assert_eq!(out.stats.extraction.recomputed, vec![DeclId(1)]);
    assert_eq!(out.stats.extraction.unchanged, 1);
    assert!(out.stats.generated.is_quiet());
    assert!(out.stats.emission.is_quiet());
    assert!(out.artifact_delta.is_empty());
}

#[test]
fn removing_an_owner_retracts_its_artifact() {
    let mut driver = Driver::default();
    pass(&mut driver, &snapshot());

    let without_b: Snapshot = inputs()
        .into_iter()
        .filter(|input| input.container.owner != OwnerKey::class("App.B"))
        .collect();
    let out = pass(&mut driver, &without_b);

    assert_eq!(hint_names(&out), vec!["App.A.g.rs", "__KnownEvents.g.rs"]);
    let removed: Vec<String> = out.artifact_delta.removed.iter().map(ToString::to_string).collect();
    assert_eq!(removed, vec!["App.B.g.rs"]);
    assert_eq!(out.stats.emission.removed, vec![OwnerKey::class("App.B")]);
    assert_eq!(out.stats.groups.removed, vec![OwnerKey::class("App.B")]);
}

#[test]
fn adding_an_event_reemits_the_aggregate() {
    let mut driver = Driver::default();
    pass(&mut driver, &snapshot());

    let c = container("App.C").with_changing_event("PropertyChanging");
    let out = pass(&mut driver, &snapshot().with(field(4, &c, "_flag", "bool")));

    assert_eq!(out.stats.known_events.recomputed.len(), 1);
    let changed: Vec<String> = out.artifact_delta.changed.iter().map(ToString::to_string).collect();
    assert_eq!(changed, vec!["__KnownEvents.g.rs"]);
    assert_eq!(out.stats.emission.cached, 2);
}

#[test]
fn duplicate_events_leave_the_aggregate_cached() {
    let mut driver = Driver::default();
    pass(&mut driver, &snapshot());

    // Same event set as before, one more contributor
    let c = container("App.C");
    let out = pass(&mut driver, &snapshot().with(field(4, &c, "_flag", "bool")));

    assert!(out.stats.known_events.is_quiet());
    let added: Vec<String> = out.artifact_delta.added.iter().map(ToString::to_string).collect();
    assert_eq!(added, vec!["App.C.g.rs"]);
}

#[test]
fn reset_starts_cold() {
    let mut driver = Driver::new(PipelineConfig::sequential());
    pass(&mut driver, &snapshot());
    driver.reset();

    let out = pass(&mut driver, &snapshot());
    assert_eq!(out.pass, 1);
    assert_eq!(out.stats.extraction.recomputed.len(), 3);
    assert_eq!(out.artifact_delta.added.len(), 3);
}

#[test]
fn rerun_with_diagnostics_has_empty_delta() {
    let a = container("App.A");
    let defective = Snapshot::from(inputs())
        .with(field(4, &a, "_raw", "*const u8"))
        .with(field(5, &a, "_name", "String"))
        .with(field(6, &a, "m_name", "String"));

    let mut driver = Driver::default();
    let first = pass(&mut driver, &defective);
    let second = pass(&mut driver, &defective);

    let codes: Vec<DiagnosticCode> = first.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            DiagnosticCode::DuplicateGeneratedMember,
            DiagnosticCode::UnsupportedFieldType
        ]
    );
    assert_eq!(first.diagnostic_delta.added.len(), 2);
    assert_eq!(first.artifacts, second.artifacts);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert!(second.diagnostic_delta.is_empty());
}

fn notify(owner: &ContainerInfo, args: &[&str]) -> DeclarationInput {
    let attr = Attribute::with_args(attributes::NOTIFY_PROPERTY_CHANGED_FOR, args.iter().copied());
    field_with(4, owner, "_total", "u32", &[attr])
}

#[test]
fn repeated_diagnostic_resolves_one_at_a_time() {
    let a = container("App.A");
    let mut driver = Driver::default();
    let first = pass(&mut driver, &snapshot().with(notify(&a, &["1x", "1x"])));
    assert_eq!(first.diagnostics.len(), 2);
    assert_eq!(first.diagnostics[0], first.diagnostics[1]);

    let second = pass(&mut driver, &snapshot().with(notify(&a, &["1x"])));
    assert_eq!(second.diagnostics.len(), 1);
    assert_eq!(second.diagnostic_delta.resolved.len(), 1);
    assert!(second.diagnostic_delta.added.is_empty());

    let third = pass(&mut driver, &snapshot().with(notify(&a, &["Other"])));
    assert!(third.diagnostics.is_empty());
    assert_eq!(third.diagnostic_delta.resolved.len(), 1);
}
