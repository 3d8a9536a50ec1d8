use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid payload.")]
    InvalidPayload,

    #[error("That email already exists.")]
    DuplicateEmail,

    #[error("That username already exists.")]
    DuplicateUsername,

    #[error("User does not exist")]
    NotFound,

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether the error is a uniqueness conflict on create
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateEmail | Self::DuplicateUsername)
    }

    /// Whether the error is an unexpected fault rather than a caller mistake
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::Internal { .. } | Self::Storage { .. }
        )
    }
}
