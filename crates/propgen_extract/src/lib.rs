//! Declaration model and fact extraction for propgen.
//!
//! This crate provides:
//! - [`DeclarationInput`] - The front end's per-declaration input tuple
//! - [`FactExtractor`] - Pure, total extraction of [`ItemFacts`] plus diagnostics
//! - [`TypeCatalog`] - Read-only type classification capability
//! - [`naming`] - Generated member naming rules

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod attributes;
pub mod catalog;
pub mod declaration;
pub mod extractor;
pub mod facts;
pub mod naming;

pub use catalog::{BuiltinTypeCatalog, TypeCatalog, TypeClass};
pub use declaration::{
    Attribute, AttributeFlags, ContainerInfo, DeclId, Declaration, DeclarationInput, Modifiers,
    TypeRef,
};
pub use extractor::FactExtractor;
pub use facts::{Extraction, ItemFacts};
