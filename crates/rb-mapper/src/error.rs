//! Mapper error types.

use thiserror::Error;

use rb_model::UniverseError;

/// Errors raised while reconciling role assignments.
#[derive(Debug, Error)]
pub enum MapperError {
    /// A channel's regular expression failed to compile.
    ///
    /// This disables the channel for the current invocation only; sibling
    /// channels still run.
    #[error("invalid pattern {expression:?}: {message}")]
    InvalidPattern {
        /// The configured expression, verbatim.
        expression: String,
        /// The matching library's diagnostic.
        message: String,
    },

    /// The role universe collaborator failed; propagates to the caller.
    #[error(transparent)]
    Universe(#[from] UniverseError),
}

impl MapperError {
    /// Creates an invalid-pattern error.
    #[must_use]
    pub fn invalid_pattern(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Checks if this is a pattern-compilation error.
    #[must_use]
    pub const fn is_pattern_error(&self) -> bool {
        matches!(self, Self::InvalidPattern { .. })
    }
}

/// Result type for mapper operations.
pub type MapperResult<T> = Result<T, MapperError>;
