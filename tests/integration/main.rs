//! End-to-end tests for the full propgen pass.
//!
//! These drive [`Driver`] over snapshots the way a host front end would:
//! one snapshot per edit, each pass reusing the previous pass's work.

mod collisions;
mod determinism;
mod incremental;

use propgen_driver::{CancellationToken, Driver, PassOutput, Snapshot};
use propgen_extract::{Attribute, ContainerInfo, DeclId, Declaration, DeclarationInput, TypeRef};
use propgen_foundation::{LanguageVersion, Location, OwnerKey, Span};

/// Language version every fixture compiles with.
pub const LANGUAGE: LanguageVersion = LanguageVersion::new(10, 0);

/// A notifying container named `owner`.
pub fn container(owner: &str) -> ContainerInfo {
    ContainerInfo::observable(OwnerKey::class(owner))
}

/// An observable field declared on line `id` of the owner's file.
pub fn field(id: u64, container: &ContainerInfo, name: &str, ty: &str) -> DeclarationInput {
    field_with(id, container, name, ty, &[])
}

/// Like [`field`], with extra attributes.
pub fn field_with(
    id: u64,
    container: &ContainerInfo,
    name: &str,
    ty: &str,
    attrs: &[Attribute],
) -> DeclarationInput {
    let line = u32::try_from(id).unwrap();
    let file = format!("{}.rs", container.owner.simple_name());
    let mut decl =
        Declaration::new(name, TypeRef::new(ty), Location::new(file, Span::new(0, 0, line, 5)))
            .observable();
    for attr in attrs {
        decl = decl.with_attribute(attr.clone());
    }
    DeclarationInput::new(DeclId(id), decl, container.clone(), LANGUAGE)
}

/// Runs one pass, panicking on failure.
pub fn pass(driver: &mut Driver, snapshot: &Snapshot) -> PassOutput {
    driver.run_pass(snapshot, &CancellationToken::new()).unwrap()
}

/// Hint names of a pass's artifacts, in publication order.
pub fn hint_names(output: &PassOutput) -> Vec<String> {
    output.artifacts.hint_names().map(ToString::to_string).collect()
}

/// Text of one published artifact.
pub fn text<'a>(output: &'a PassOutput, hint_name: &str) -> &'a str {
    output
        .artifacts
        .get(hint_name)
        .map(|a| &*a.text)
        .unwrap_or_else(|| panic!("{hint_name} was not published"))
}
