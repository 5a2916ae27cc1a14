//! Error taxonomy for the ledger core.
//!
//! Three classes matter to callers: validation failures carry the offending
//! field so forms can surface a field-specific message, storage failures come
//! from the persistence layer and may be retried by the ambient retry wrapper,
//! and conversion failures mean a stored value could not be decoded.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid stored value: {0}")]
    Conversion(String),
}

impl Error {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Error::Storage(message.into())
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        Error::Conversion(message.into())
    }

    /// Field name for validation errors, used by form bindings.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Whether the ambient retry wrapper may retry the failed call.
    /// Validation and not-found errors are user-correctable, not transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}
