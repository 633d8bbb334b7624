//! Naming rules for generated members.

/// Derives the generated property name from a backing field name.
///
/// Strips a leading `m_` or `_`, then upper-cases the first character:
/// `_firstName` → `FirstName`, `m_count` → `Count`, `title` → `Title`.
/// Returns `None` when nothing is left after stripping.
#[must_use]
pub fn property_name(field: &str) -> Option<String> {
    let stripped = field
        .strip_prefix("m_")
        .or_else(|| field.strip_prefix('_'))
        .unwrap_or(field);

    let mut chars = stripped.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

/// Returns true if `name` is a plain identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Identifiers that generated properties must never take.
pub const RESERVED: &[&str] = &["Self"];
