//! Error types for form rendering.

use thiserror::Error;

/// Form helper errors.
///
/// Rendering itself never fails; these cover configuration loading and calls
/// coming in through a host template engine.
#[derive(Debug, Error)]
pub enum FormError {
    /// Template key not recognised.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// No view function registered under the name.
    #[error("unknown view function: {0}")]
    UnknownFunction(String),

    /// Engine function called with an unsupported method.
    #[error("unknown form method: {0}")]
    UnknownMethod(String),

    /// Required argument not supplied.
    #[error("missing argument: {0}")]
    MissingArgument(String),

    /// Argument supplied with the wrong shape.
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    /// Template configuration could not be parsed.
    #[error("invalid template configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The shared renderer lock was poisoned by a panicking writer.
    #[error("form renderer lock poisoned")]
    LockPoisoned,
}

impl FormError {
    /// Shorthand for an [`FormError::InvalidArgument`].
    pub fn invalid(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
