use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{DocumentStore, DocumentStoreError};
use crate::domain::StoragePath;

/// Filesystem-backed store for development runs without cloud credentials.
pub struct LocalDocumentStore {
    inner: Arc<LocalFileSystem>,
    base_path: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(base_path: PathBuf) -> Result<Self, DocumentStoreError> {
        std::fs::create_dir_all(&base_path).map_err(DocumentStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| DocumentStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            base_path,
        })
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn put(&self, path: &StoragePath, data: Bytes) -> Result<String, DocumentStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .put(&store_path, PutPayload::from(data))
            .await
            .map_err(|e| DocumentStoreError::UploadFailed(e.to_string()))?;

        Ok(format!(
            "file://{}/{}",
            self.base_path.display(),
            path.as_str()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentId;

    #[tokio::test]
    async fn given_bytes_when_putting_then_file_lands_under_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDocumentStore::new(dir.path().to_path_buf()).unwrap();
        let path = StoragePath::new(&DocumentId::new(), "hello.txt");

        let locator = store
            .put(&path, Bytes::from_static(b"Hello world"))
            .await
            .unwrap();

        assert!(locator.starts_with("file://"));
        let on_disk = dir.path().join(path.as_str());
        assert_eq!(std::fs::read(on_disk).unwrap(), b"Hello world");
    }
}
