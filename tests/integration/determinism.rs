//! Output independence from discovery order and scheduling

use propgen_driver::{Driver, PipelineConfig, Snapshot};
use propgen_extract::DeclarationInput;
use proptest::prelude::*;

use crate::{container, field, pass};

fn inputs() -> Vec<DeclarationInput> {
    let owners = ["App.A", "App.B", "App.C", "App.D"];
    let mut inputs = Vec::new();
    let mut id = 0;
    for owner in owners {
        let c = container(owner);
        for name in ["_alpha", "_beta", "_gamma"] {
            id += 1;
            inputs.push(field(id, &c, name, "String"));
        }
    }
    inputs
}

/// Moves whole owners around while keeping each owner's members in order.
fn shuffle_owners(inputs: &[DeclarationInput], rotation: usize) -> Vec<DeclarationInput> {
    let mut chunks: Vec<&[DeclarationInput]> = inputs.chunks(3).collect();
    let n = chunks.len();
    chunks.rotate_left(rotation % n);
    chunks.into_iter().flatten().cloned().collect()
}

#[test]
fn reordering_unrelated_owners_changes_nothing() {
    let base = inputs();
    let mut driver = Driver::default();
    let first = pass(&mut driver, &Snapshot::from(base.clone()));

    let rotated = Snapshot::from(shuffle_owners(&base, 2));
    let second = pass(&mut driver, &rotated);

    assert_eq!(first.artifacts, second.artifacts);
    assert!(second.artifact_delta.is_empty());
    assert!(second.stats.emission.is_quiet());
}

#[test]
fn parallel_and_sequential_passes_agree() {
    let snapshot = Snapshot::from(inputs());
    let sequential = pass(&mut Driver::new(PipelineConfig::sequential()), &snapshot);
    let parallel = pass(&mut Driver::new(PipelineConfig::parallel()), &snapshot);

    assert_eq!(sequential.artifacts, parallel.artifacts);
    assert_eq!(sequential.diagnostics, parallel.diagnostics);
}

#[test]
fn diagnostics_are_sorted() {
    let c = container("App.Z");
    let mut base = inputs();
    base.push(field(100, &c, "Bad", "String"));
    base.push(field(101, &c, "_ptr", "*const u8"));
    let out = pass(&mut Driver::default(), &Snapshot::from(base));

    let mut sorted = out.diagnostics.clone();
    sorted.sort();
    assert_eq!(out.diagnostics, sorted);
    assert_eq!(out.diagnostics.len(), 2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn owner_order_never_affects_artifacts(rotation in 0usize..4, parallel in any::<bool>()) {
        let base = inputs();
        let config = PipelineConfig::default().with_parallel(parallel);

        let a = pass(&mut Driver::new(config.clone()), &Snapshot::from(base.clone()));
        let b = pass(&mut Driver::new(config), &Snapshot::from(shuffle_owners(&base, rotation)));

        prop_assert_eq!(a.artifacts, b.artifacts);
        prop_assert_eq!(a.diagnostics, b.diagnostics);
    }
}
