//! Source location tracking.
//!
//! `Span` tracks the position of a declaration in its source file, and
//! `Location` pairs it with the file so diagnostics can point at it.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A span of source text.
///
/// Tracks byte offsets and line/column positions for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// Byte offset where this span starts.
    pub start: usize,
    /// Byte offset where this span ends (exclusive).
    pub end: usize,
    /// 1-based line number where this span starts.
    pub line: u32,
    /// 1-based column number where this span starts.
    pub column: u32,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Creates a span at the start of input.
    #[must_use]
    pub const fn at_start() -> Self {
        Self {
            start: 0,
            end: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the length of this span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if this span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A span within a named source file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Path or identifier of the source file.
    pub file: Arc<str>,
    /// Position within the file.
    pub span: Span,
}

impl Location {
    /// Creates a location.
    #[must_use]
    pub fn new(file: impl Into<Arc<str>>, span: Span) -> Self {
        Self {
            file: file.into(),
            span,
        }
    }

    /// A location for findings that belong to no particular source,
    /// such as collisions between generated artifacts.
    #[must_use]
    pub fn none() -> Self {
        Self {
            file: Arc::from(""),
            span: Span::default(),
        }
    }

    /// Returns true if this location points nowhere.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.file.is_empty()
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "<generated>")
        } else {
            write!(f, "{}:{}:{}", self.file, self.span.line, self.span.column)
        }
    }
}
