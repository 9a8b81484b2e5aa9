//! Error taxonomy for the push core
//!
//! Message-level errors (`InvalidInput`, `TypeMismatch`) abort only the
//! message they were raised for. Parameter errors and storage errors raised
//! while persisting an import profile abort the whole batch.

use thiserror::Error;

/// Boxed cause carried by [`PushError::Storage`]
pub type StorageCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by the push core
#[derive(Debug, Error)]
pub enum PushError {
    /// A required message field is missing or unusable
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A message field holds a value of the wrong type
    #[error("type mismatch in '{field}': {reason}")]
    TypeMismatch {
        /// Name of the offending field
        field: &'static str,
        /// What was found instead
        reason: String,
    },

    /// A request parameter names a value the core does not know
    #[error("unsupported '{name}' parameter value: {value}")]
    UnsupportedParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: String,
    },

    /// A request parameter could not be parsed
    #[error("invalid '{name}' parameter (must be an integer): {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: String,
    },

    /// The store rejected or failed a write or query
    #[error("storage error: {message}")]
    Storage {
        /// What the core was trying to do
        message: String,
        /// Underlying cause, when the store reported one
        #[source]
        source: Option<StorageCause>,
    },
}

impl PushError {
    /// Storage error without an underlying cause
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Storage error wrapping the store's own error
    #[must_use]
    pub fn storage_with(message: impl Into<String>, cause: anyhow::Error) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(cause.into()),
        }
    }

    /// Whether this error was caused by malformed caller input
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage { .. })
    }
}
