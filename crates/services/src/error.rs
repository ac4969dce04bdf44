//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{ConfigurationError, SessionStateError};
use quiz_core::normalize::NormalizeError;

/// Errors emitted by the session engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    /// The selected configuration is not offered by this game. Fatal to `start`.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The raw answer is malformed. The session is left untouched.
    #[error(transparent)]
    InvalidFormat(#[from] NormalizeError),
    /// The engine was driven outside an active session, or out of order.
    #[error(transparent)]
    State(#[from] SessionStateError),
}

impl SessionError {
    #[must_use]
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, SessionError::InvalidFormat(_))
    }

    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, SessionError::State(SessionStateError::OutOfRange))
    }
}
