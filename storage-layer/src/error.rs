use error_common::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Backend failed: {0}")]
    Backend(String),

    #[error("Attachment not found: {0}")]
    AttachmentNotFound(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization(e) => CoreError::Serialization(e.to_string()),
            other => CoreError::Storage(other.to_string()),
        }
    }
}
