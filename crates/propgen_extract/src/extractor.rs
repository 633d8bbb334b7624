//! Fact extractor implementation.
//!
//! Turns one [`DeclarationInput`] into an [`Extraction`]. Extraction is total:
//! malformed input never fails, it produces diagnostics and a best-effort
//! [`ItemFacts`] with `suppressed` set whenever an error was reported.

use std::sync::Arc;

use propgen_foundation::{Diagnostic, DiagnosticCode, LanguageVersion, Location, Seq};
use tracing::trace;

use crate::attributes;
use crate::catalog::{TypeCatalog, TypeClass};
use crate::declaration::{Attribute, DeclarationInput};
use crate::facts::{Extraction, ItemFacts};
use crate::naming;

/// Extracts [`ItemFacts`] from declarations.
#[derive(Clone, Copy, Debug)]
pub struct FactExtractor {
    /// Minimum language version required to generate anything.
    min_language_version: LanguageVersion,
}

impl Default for FactExtractor {
    fn default() -> Self {
        Self::new(LanguageVersion::MIN)
    }
}

impl FactExtractor {
    /// Creates an extractor gated on the given language version.
    #[must_use]
    pub const fn new(min_language_version: LanguageVersion) -> Self {
        Self {
            min_language_version,
        }
    }

    /// Returns the configured minimum language version.
    #[must_use]
    pub const fn min_language_version(&self) -> LanguageVersion {
        self.min_language_version
    }

    /// Extracts facts and diagnostics for one declaration.
    ///
    /// Pure: the result depends only on `input`, the extractor's own
    /// configuration, and the answers of `catalog`.
    #[must_use]
    pub fn extract(&self, input: &DeclarationInput, catalog: &dyn TypeCatalog) -> Extraction {
        let decl = &input.declaration;
        let owner = input.container.owner.clone();

        if !input.language.supports(self.min_language_version) {
            trace!(id = %input.id, version = %input.language, "language version gate");
            return Extraction {
                facts: ItemFacts::sentinel(owner, decl.name.clone()),
                diagnostics: Seq::new().push_back(Diagnostic::new(
                    DiagnosticCode::LanguageVersionTooLow,
                    format!(
                        "observable property generation requires language version {} or later, \
                         but `{}` is compiled with {}",
                        self.min_language_version, decl.name, input.language
                    ),
                    decl.location.clone(),
                )),
            };
        }

        let mut cx = Cx::new(&decl.location);
        let mut facts = ItemFacts::sentinel(owner, decl.name.clone());

        // Container
        match &input.container.changed_event {
            Some(event) => facts.changed_event = event.clone(),
            None => cx.report(
                DiagnosticCode::InvalidContainingType,
                format!(
                    "{} cannot raise change notifications, so `{}` cannot be observable",
                    input.container.owner, decl.name
                ),
            ),
        }
        facts.changing_event.clone_from(&input.container.changing_event);
        for event in facts.referenced_events() {
            if !naming::is_identifier(event) {
                cx.report(
                    DiagnosticCode::InvalidContainingType,
                    format!(
                        "{} declares event {event:?}, which is not a valid name",
                        input.container.owner
                    ),
                );
            }
        }

        // Modifiers
        if decl.modifiers.is_static {
            cx.report(
                DiagnosticCode::StaticField,
                format!("static field `{}` cannot back an observable property", decl.name),
            );
        }
        if decl.modifiers.is_readonly {
            cx.report(
                DiagnosticCode::ReadOnlyField,
                format!("read-only field `{}` cannot back a settable property", decl.name),
            );
        }

        // Type
        match catalog.classify(&decl.ty) {
            TypeClass::Unsupported { reason } => cx.report(
                DiagnosticCode::UnsupportedFieldType,
                format!("field `{}` has type `{}`: {reason}", decl.name, decl.ty.name),
            ),
            class => {
                facts.is_value_type = class.is_value();
                facts.type_name = Arc::from(decl.ty.display_name());
            }
        }

        // Name
        match naming::property_name(&decl.name) {
            None => cx.report(
                DiagnosticCode::ReservedGeneratedName,
                format!("field `{}` does not produce a usable property name", decl.name),
            ),
            Some(name) if *name == *decl.name => cx.report(
                DiagnosticCode::GeneratedNameCollision,
                format!(
                    "field `{}` would generate a property with the same name; \
                     prefix it with `_` or use a lowercase first letter",
                    decl.name
                ),
            ),
            Some(name) if Self::is_reserved(&name, input) => cx.report(
                DiagnosticCode::ReservedGeneratedName,
                format!(
                    "field `{}` would generate property `{name}`, which is reserved",
                    decl.name
                ),
            ),
            Some(name) => facts.property_name = Arc::from(name),
        }

        // Attributes
        for attr in &decl.attributes {
            match &*attr.name {
                attributes::NOTIFY_PROPERTY_CHANGED_FOR => {
                    for name in cx.identifier_args(attr) {
                        if name == facts.property_name {
                            cx.report(
                                DiagnosticCode::SelfNotification,
                                format!(
                                    "`{name}` already notifies itself; the extra notification is ignored"
                                ),
                            );
                        } else if !facts.also_notify.iter().any(|n| *n == name) {
                            facts.also_notify = facts.also_notify.push_back(name);
                        }
                    }
                }
                attributes::NOTIFY_CAN_EXECUTE_CHANGED_FOR => {
                    for name in cx.identifier_args(attr) {
                        if !facts.notify_commands.iter().any(|n| *n == name) {
                            facts.notify_commands = facts.notify_commands.push_back(name);
                        }
                    }
                }
                attributes::NOTIFY_DATA_ERROR_INFO => {
                    if input.container.supports_validation {
                        facts.validates = true;
                    } else {
                        cx.report(
                            DiagnosticCode::MissingValidationSupport,
                            format!(
                                "{} cannot validate properties; `{}` is ignored on `{}`",
                                input.container.owner, attr.name, decl.name
                            ),
                        );
                    }
                }
                attributes::NOTIFY_PROPERTY_CHANGED_RECIPIENTS => {
                    if input.container.supports_recipients {
                        facts.broadcasts = true;
                    } else {
                        cx.report(
                            DiagnosticCode::MissingRecipientSupport,
                            format!(
                                "{} has no recipients to broadcast to; `{}` is ignored on `{}`",
                                input.container.owner, attr.name, decl.name
                            ),
                        );
                    }
                }
                _ => {}
            }
        }

        let diagnostics = cx.finish();
        facts.suppressed = diagnostics.iter().any(Diagnostic::is_error);
        Extraction { facts, diagnostics }
    }

    fn is_reserved(name: &str, input: &DeclarationInput) -> bool {
        naming::RESERVED.contains(&name)
            || input.container.changed_event.as_deref() == Some(name)
            || input.container.changing_event.as_deref() == Some(name)
    }
}

// =============================================================================
// Extraction Context
// =============================================================================

/// Diagnostics accumulated while extracting one declaration.
struct Cx<'a> {
    location: &'a Location,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Cx<'a> {
    fn new(location: &'a Location) -> Self {
        Self {
            location,
            diagnostics: Vec::new(),
        }
    }

    fn report(&mut self, code: DiagnosticCode, message: String) {
        self.diagnostics
            .push(Diagnostic::new(code, message, self.location.clone()));
    }

    /// Returns the valid identifier arguments of `attr`, reporting the rest.
    fn identifier_args(&mut self, attr: &Attribute) -> Vec<Arc<str>> {
        if attr.args.is_empty() {
            self.report(
                DiagnosticCode::InvalidAttributeArgument,
                format!("`{}` requires at least one name", attr.name),
            );
            return Vec::new();
        }

        let mut valid = Vec::with_capacity(attr.args.len());
        for arg in &attr.args {
            if naming::is_identifier(arg) {
                valid.push(arg.clone());
            } else {
                self.report(
                    DiagnosticCode::InvalidAttributeArgument,
                    format!("`{}` argument {arg:?} is not a valid name", attr.name),
                );
            }
        }
        valid
    }

    fn finish(self) -> Seq<Diagnostic> {
        self.diagnostics.into()
    }
}
