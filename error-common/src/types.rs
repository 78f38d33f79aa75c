use thiserror::Error;

/// Error enum shared by every LabFlow Engine service crate
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input validation errors (missing or malformed required fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation not allowed in the record's current state
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Referenced identifier has no stored record
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Key-value store operation errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Record encoding/decoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Builds a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Builds a precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Builds a not-found error for the given entity type and identifier
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// True for the expected, recoverable categories the caller can surface
    /// directly to an operator (validation, precondition, not-found)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Precondition(_) | Self::NotFound { .. }
        )
    }
}

/// Result type alias for LabFlow Engine operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Logs an error with its operation context
pub fn log_error(context: &str, error: &CoreError) {
    tracing::error!(
        context = context,
        error = %error,
        "LabFlow engine error occurred"
    );
}
