//! Type classification capability.
//!
//! The extractor never looks types up in global state. A [`TypeCatalog`] is
//! handed to every extraction call, read-only, and must answer the same way
//! for the same type for as long as a driver holds it.

use std::sync::Arc;

use crate::declaration::TypeRef;

/// How a declared type can back a generated property.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeClass {
    /// Copyable value; getters return it by value.
    Value,
    /// Owned non-copy value; getters return a reference.
    Reference,
    /// Cannot back a property.
    Unsupported {
        /// Why the type was rejected.
        reason: Arc<str>,
    },
}

impl TypeClass {
    /// Returns true for [`TypeClass::Value`].
    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value)
    }
}

/// Read-only type classification supplied by the front end.
pub trait TypeCatalog: Send + Sync {
    /// Classifies a declared type.
    fn classify(&self, ty: &TypeRef) -> TypeClass;
}

/// Purely syntactic catalog covering the built-in scalar types.
///
/// Scalars are values, borrowed/unsized/pointer types are rejected, and
/// everything else is treated as an owned reference type.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinTypeCatalog;

impl BuiltinTypeCatalog {
    const SCALARS: &'static [&'static str] = &[
        "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
        "u128", "usize", "f32", "f64",
    ];

    fn rejection(name: &str) -> Option<&'static str> {
        if name.is_empty() {
            Some("the type is missing")
        } else if name.starts_with('*') {
            Some("raw pointers cannot back a property")
        } else if name.starts_with('&') {
            Some("borrowed types cannot back a property")
        } else if name == "()" || name == "!" {
            Some("the type carries no value")
        } else if name == "str" || name.starts_with('[') || name.starts_with("dyn ") {
            Some("unsized types cannot back a property")
        } else {
            None
        }
    }
}

impl TypeCatalog for BuiltinTypeCatalog {
    fn classify(&self, ty: &TypeRef) -> TypeClass {
        let name = ty.name.trim();
        if let Some(reason) = Self::rejection(name) {
            return TypeClass::Unsupported {
                reason: Arc::from(reason),
            };
        }
        if Self::SCALARS.contains(&name) {
            TypeClass::Value
        } else {
            TypeClass::Reference
        }
    }
}
