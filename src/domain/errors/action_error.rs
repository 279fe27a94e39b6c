//! Use-case level error type.

use thiserror::Error;

use super::{ApiError, ValidationErrors};

/// Outcome of a rejected user action.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Input failed client-side checks; nothing was sent.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    /// The signed-in user's roles do not allow the action; nothing was sent.
    #[error("not permitted: {action}")]
    Forbidden { action: String },

    /// The backend or transport failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ActionError {
    /// Creates forbidden error.
    #[must_use]
    pub fn forbidden(action: impl Into<String>) -> Self {
        Self::Forbidden {
            action: action.into(),
        }
    }

    /// Field errors from either the client or the server.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) | Self::Api(ApiError::Validation(errors)) => Some(errors),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(
            self,
            Self::Forbidden { .. } | Self::Api(ApiError::Forbidden { .. })
        )
    }
}
