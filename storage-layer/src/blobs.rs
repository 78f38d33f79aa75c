use crate::error::{StorageError, StorageResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Opaque handle to an attachment held by the blob store.
///
/// The engine records references (authorization letters, lab invoice
/// documents) but never looks inside the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentRef(String);

impl AttachmentRef {
    /// Wraps an externally produced reference (e.g. a URL)
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the reference as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AttachmentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque attachment storage contract
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores the attachment bytes and returns a reference to them
    async fn store_attachment(&self, bytes: Vec<u8>) -> StorageResult<AttachmentRef>;

    /// Resolves a previously stored attachment
    async fn resolve_attachment(&self, reference: &AttachmentRef) -> StorageResult<Vec<u8>>;
}

/// In-process [`BlobStore`] used by tests and embedders
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Creates an empty in-memory blob store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn store_attachment(&self, bytes: Vec<u8>) -> StorageResult<AttachmentRef> {
        let reference = format!("blob:{}", Uuid::new_v4());
        self.blobs.write().await.insert(reference.clone(), bytes);
        Ok(AttachmentRef::new(reference))
    }

    async fn resolve_attachment(&self, reference: &AttachmentRef) -> StorageResult<Vec<u8>> {
        self.blobs
            .read()
            .await
            .get(reference.as_str())
            .cloned()
            .ok_or_else(|| StorageError::AttachmentNotFound(reference.to_string()))
    }
}
