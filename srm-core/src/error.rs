//! Error types for the srm-core library

use thiserror::Error;

/// Main error type for segmentation operations
#[derive(Error, Debug)]
pub enum SrmError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Resource exhausted: {message}")]
    ResourceExhausted { message: String },

    #[error("Internal invariant violated: {message}")]
    InternalInvariant { message: String },
}

impl SrmError {
    /// Create a new invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new resource-exhausted error
    pub fn resource_exhausted(message: impl Into<String>) -> Self {
        Self::ResourceExhausted {
            message: message.into(),
        }
    }

    /// Create a new internal-invariant error
    pub fn internal_invariant(message: impl Into<String>) -> Self {
        Self::InternalInvariant {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type SrmResult<T> = Result<T, SrmError>;
