use std::io;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::StoragePath;

/// Object-store collaborator holding the original uploaded bytes. `put`
/// returns a URI-like locator for the stored object.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn put(&self, path: &StoragePath, data: Bytes) -> Result<String, DocumentStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
