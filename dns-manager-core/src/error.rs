//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use dns_manager_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Provider account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Domain not found
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// Local DNS record (or preset record) not found
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Preset not found
    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    /// A domain with this name is already managed
    #[error("Domain already exists: {0}")]
    DomainExists(String),

    /// Remote API reported a failure that is not a per-record error
    #[error("API error: {provider} - {message}")]
    ApiError { provider: String, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Configuration file or environment error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Provider error (converted from the client library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether the error comes from user input or a missing resource; used to pick the log level.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::AccountNotFound(_)
            | Self::DomainNotFound(_)
            | Self::RecordNotFound(_)
            | Self::PresetNotFound(_)
            | Self::DomainExists(_)
            | Self::ValidationError(_) => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
