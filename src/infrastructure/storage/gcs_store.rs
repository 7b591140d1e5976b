use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{DocumentStore, DocumentStoreError};
use crate::domain::StoragePath;

/// Google Cloud Storage adapter. `put` returns the `gs://bucket/path` locator
/// recorded in the analytics row.
pub struct GcsDocumentStore {
    inner: Arc<dyn ObjectStore>,
    bucket: String,
}

impl GcsDocumentStore {
    pub fn new(bucket: &str, service_account_key: &str) -> Result<Self, DocumentStoreError> {
        let store = GoogleCloudStorageBuilder::new()
            .with_bucket_name(bucket)
            .with_service_account_key(service_account_key)
            .build()
            .map_err(|e| DocumentStoreError::UploadFailed(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(store),
            bucket: bucket.to_string(),
        })
    }
}

#[async_trait]
impl DocumentStore for GcsDocumentStore {
    async fn put(&self, path: &StoragePath, data: Bytes) -> Result<String, DocumentStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .put(&store_path, PutPayload::from(data))
            .await
            .map_err(|e| DocumentStoreError::UploadFailed(e.to_string()))?;

        Ok(format!("gs://{}/{}", self.bucket, path.as_str()))
    }
}
