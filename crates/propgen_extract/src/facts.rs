//! Extracted generation facts.

use std::sync::Arc;

use propgen_foundation::{Diagnostic, OwnerKey, Seq};

/// Everything generation needs to know about one declaration.
///
/// Equality is structural over every field. Downstream caches key on it, so
/// only generation-relevant data lives here: no spans, no diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemFacts {
    /// Containing type.
    pub owner: OwnerKey,
    /// Backing field name.
    pub field_name: Arc<str>,
    /// Generated property name.
    pub property_name: Arc<str>,
    /// Property type as rendered in generated code.
    pub type_name: Arc<str>,
    /// Whether getters return by value.
    pub is_value_type: bool,
    /// After-change event raised on set.
    pub changed_event: Arc<str>,
    /// Before-change event raised on set, if the container has one.
    pub changing_event: Option<Arc<str>>,
    /// Additional properties notified on set, in attribute order.
    pub also_notify: Seq<Arc<str>>,
    /// Commands refreshed on set, in attribute order.
    pub notify_commands: Seq<Arc<str>>,
    /// Validate the new value on set.
    pub validates: bool,
    /// Broadcast the change to recipients on set.
    pub broadcasts: bool,
    /// Generation must not proceed for this item.
    pub suppressed: bool,
}

impl ItemFacts {
    /// Best-effort placeholder for a declaration that could not be extracted.
    #[must_use]
    pub fn sentinel(owner: OwnerKey, field_name: Arc<str>) -> Self {
        Self {
            owner,
            field_name,
            property_name: Arc::from(""),
            type_name: Arc::from(""),
            is_value_type: false,
            changed_event: Arc::from(""),
            changing_event: None,
            also_notify: Seq::new(),
            notify_commands: Seq::new(),
            validates: false,
            broadcasts: false,
            suppressed: true,
        }
    }

    /// Returns true if a member should be generated for this item.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        !self.suppressed
    }

    /// Returns every event name this item raises.
    pub fn referenced_events(&self) -> impl Iterator<Item = &Arc<str>> {
        std::iter::once(&self.changed_event)
            .chain(self.changing_event.as_ref())
            .filter(|e| !e.is_empty())
    }
}

/// Result of extracting one declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extraction {
    /// Facts, possibly a suppressed sentinel.
    pub facts: ItemFacts,
    /// Findings about the declaration, in discovery order.
    pub diagnostics: Seq<Diagnostic>,
}

impl Extraction {
    /// Returns true if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}
