//! Error types for the propgen system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! An [`Error`] aborts a pass. Recoverable problems with input declarations
//! are never errors; they are reported as [`crate::Diagnostic`] values.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout propgen.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for propgen operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a template rendering error.
    #[must_use]
    pub fn template(hint_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Template {
            hint_name: hint_name.into(),
            message: message.into(),
        })
    }

    /// Creates an invalid configuration option error.
    #[must_use]
    pub fn invalid_option(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::InvalidOption {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    /// Creates a cancellation error.
    #[must_use]
    pub fn cancelled() -> Self {
        Self::new(ErrorKind::Cancelled)
    }

    /// Creates an internal invariant violation error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this error reports an abandoned pass.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled)
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A template failed to render an artifact.
    #[error("template failed for {hint_name}: {message}")]
    Template {
        /// Hint name of the artifact being rendered.
        hint_name: String,
        /// Description of the failure.
        message: String,
    },

    /// A configuration option had an unusable value.
    #[error("invalid option {key}={value:?}: {reason}")]
    InvalidOption {
        /// Option key.
        key: String,
        /// Raw option value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The pass was abandoned because a newer snapshot arrived.
    #[error("pass cancelled")]
    Cancelled,

    /// Internal invariant violation (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Pipeline stage that was running.
    pub stage: Option<String>,
    /// Item or group key being processed.
    pub key: Option<String>,
    /// Pass number the error belongs to.
    pub pass: Option<u64>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stage name.
    #[must_use]
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    /// Sets the item or group key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the pass number.
    #[must_use]
    pub fn with_pass(mut self, pass: u64) -> Self {
        self.pass = Some(pass);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(pass) = self.pass {
            write!(f, "pass {pass}")?;
            sep = ", ";
        }
        if let Some(stage) = &self.stage {
            write!(f, "{sep}stage {stage}")?;
            sep = ", ";
        }
        if let Some(key) = &self.key {
            write!(f, "{sep}key {key}")?;
        }
        Ok(())
    }
}
