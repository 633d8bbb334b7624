//! Declaration input model.
//!
//! These are the values the front end hands to the pipeline. They are plain
//! snapshots: every field is compared structurally, so an unchanged
//! declaration re-observed on the next pass is equal to its previous self.

use std::fmt;
use std::sync::Arc;

use propgen_foundation::{LanguageVersion, Location, OwnerKey, Seq};

use crate::attributes;

// =============================================================================
// Identity
// =============================================================================

/// Front-end supplied identity of a declaration, stable across passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u64);

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

// =============================================================================
// Types and Attributes
// =============================================================================

/// Reference to a declared field type, as spelled by the front end.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Type name as written (e.g. `String`, `u32`, `Vec<Item>`).
    pub name: Arc<str>,
    /// Whether the field may hold no value.
    pub nullable: bool,
}

impl TypeRef {
    /// Creates a non-nullable type reference.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            nullable: false,
        }
    }

    /// Creates a nullable type reference.
    #[must_use]
    pub fn nullable(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            nullable: true,
        }
    }

    /// Returns the type as it should appear in generated code.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.nullable {
            format!("Option<{}>", self.name)
        } else {
            self.name.to_string()
        }
    }
}

/// An attribute applied to a declaration, with positional string arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attribute {
    /// Attribute name.
    pub name: Arc<str>,
    /// Positional arguments.
    pub args: Seq<Arc<str>>,
}

impl Attribute {
    /// Creates an attribute without arguments.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            args: Seq::new(),
        }
    }

    /// Creates an attribute with arguments.
    #[must_use]
    pub fn with_args<I, S>(name: impl Into<Arc<str>>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Declaration modifiers relevant to generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Declared `static`.
    pub is_static: bool,
    /// Declared read-only.
    pub is_readonly: bool,
}

// =============================================================================
// Declaration
// =============================================================================

/// An attributed field inside a container.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    /// Field name.
    pub name: Arc<str>,
    /// Declared type.
    pub ty: TypeRef,
    /// Attributes, in source order.
    pub attributes: Seq<Attribute>,
    /// Modifiers.
    pub modifiers: Modifiers,
    /// Source location of the field.
    pub location: Location,
}

impl Declaration {
    /// Creates a declaration with no attributes or modifiers.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, ty: TypeRef, location: Location) -> Self {
        Self {
            name: name.into(),
            ty,
            attributes: Seq::new(),
            modifiers: Modifiers::default(),
            location,
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes = self.attributes.push_back(attribute);
        self
    }

    /// Marks the field observable.
    #[must_use]
    pub fn observable(self) -> Self {
        self.with_attribute(Attribute::new(attributes::OBSERVABLE))
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns all attributes with the given name.
    pub fn attributes_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Attribute> {
        self.attributes.iter().filter(move |a| &*a.name == name)
    }
}

// =============================================================================
// Container
// =============================================================================

/// What the containing type supports, as resolved by the front end.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContainerInfo {
    /// Identity of the container.
    pub owner: OwnerKey,
    /// Name of the after-change event the container raises, if any.
    pub changed_event: Option<Arc<str>>,
    /// Name of the before-change event the container raises, if any.
    pub changing_event: Option<Arc<str>>,
    /// Whether the container can validate property values.
    pub supports_validation: bool,
    /// Whether the container can broadcast changes to recipients.
    pub supports_recipients: bool,
}

impl ContainerInfo {
    /// Standard after-change event name.
    pub const PROPERTY_CHANGED: &'static str = "PropertyChanged";
    /// Standard before-change event name.
    pub const PROPERTY_CHANGING: &'static str = "PropertyChanging";

    /// A container that raises the standard after-change event only.
    #[must_use]
    pub fn observable(owner: OwnerKey) -> Self {
        Self {
            owner,
            changed_event: Some(Arc::from(Self::PROPERTY_CHANGED)),
            changing_event: None,
            supports_validation: false,
            supports_recipients: false,
        }
    }

    /// A container that cannot raise change notifications at all.
    #[must_use]
    pub fn plain(owner: OwnerKey) -> Self {
        Self {
            owner,
            changed_event: None,
            changing_event: None,
            supports_validation: false,
            supports_recipients: false,
        }
    }

    /// Sets the after-change event name.
    #[must_use]
    pub fn with_changed_event(mut self, event: impl Into<Arc<str>>) -> Self {
        self.changed_event = Some(event.into());
        self
    }

    /// Sets the before-change event name.
    #[must_use]
    pub fn with_changing_event(mut self, event: impl Into<Arc<str>>) -> Self {
        self.changing_event = Some(event.into());
        self
    }

    /// Enables validation support.
    #[must_use]
    pub fn with_validation(mut self) -> Self {
        self.supports_validation = true;
        self
    }

    /// Enables recipient broadcast support.
    #[must_use]
    pub fn with_recipients(mut self) -> Self {
        self.supports_recipients = true;
        self
    }
}

// =============================================================================
// Attribute Flags
// =============================================================================

/// Cheap attribute-presence flags computed by the front end.
///
/// Lets the pipeline drop unannotated declarations before any extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct AttributeFlags(u8);

impl AttributeFlags {
    /// No recognized attribute present.
    pub const NONE: Self = Self(0);
    /// `observable` present.
    pub const OBSERVABLE: Self = Self(1);
    /// `notify_property_changed_for` present.
    pub const NOTIFY_FOR: Self = Self(1 << 1);
    /// `notify_can_execute_changed_for` present.
    pub const NOTIFY_COMMAND: Self = Self(1 << 2);
    /// `notify_data_error_info` present.
    pub const VALIDATE: Self = Self(1 << 3);
    /// `notify_property_changed_recipients` present.
    pub const BROADCAST: Self = Self(1 << 4);

    /// Returns true if every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Computes flags from a declaration's attributes.
    #[must_use]
    pub fn from_attributes<'a>(attrs: impl IntoIterator<Item = &'a Attribute>) -> Self {
        attrs
            .into_iter()
            .fold(Self::NONE, |flags, attr| match &*attr.name {
                attributes::OBSERVABLE => flags.union(Self::OBSERVABLE),
                attributes::NOTIFY_PROPERTY_CHANGED_FOR => flags.union(Self::NOTIFY_FOR),
                attributes::NOTIFY_CAN_EXECUTE_CHANGED_FOR => flags.union(Self::NOTIFY_COMMAND),
                attributes::NOTIFY_DATA_ERROR_INFO => flags.union(Self::VALIDATE),
                attributes::NOTIFY_PROPERTY_CHANGED_RECIPIENTS => flags.union(Self::BROADCAST),
                _ => flags,
            })
    }
}

// =============================================================================
// Input Tuple
// =============================================================================

/// One element of the front end's declaration stream.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeclarationInput {
    /// Stable identity.
    pub id: DeclId,
    /// The declaration itself.
    pub declaration: Declaration,
    /// The containing entity.
    pub container: ContainerInfo,
    /// Attribute presence flags.
    pub flags: AttributeFlags,
    /// Language version the declaration is compiled under.
    pub language: LanguageVersion,
}

impl DeclarationInput {
    /// Creates an input, computing presence flags from the attributes.
    #[must_use]
    pub fn new(
        id: DeclId,
        declaration: Declaration,
        container: ContainerInfo,
        language: LanguageVersion,
    ) -> Self {
        let flags = AttributeFlags::from_attributes(&declaration.attributes);
        Self {
            id,
            declaration,
            container,
            flags,
            language,
        }
    }

    /// Returns true if the declaration is marked observable.
    #[must_use]
    pub fn is_observable(&self) -> bool {
        self.flags.contains(AttributeFlags::OBSERVABLE)
    }
}
