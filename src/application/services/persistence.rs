use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{DocumentRecord, DocumentStore, MetadataSink};
use crate::domain::{Document, StoragePath};

/// What happened to the original bytes. `Skipped` means the store is not
/// configured; `Failed` is deliberate: the caller sees the reason and chooses
/// to ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOutcome {
    Stored(String),
    Skipped,
    Failed(String),
}

impl StorageOutcome {
    pub fn locator(&self) -> Option<&str> {
        match self {
            StorageOutcome::Stored(locator) => Some(locator),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataOutcome {
    Logged,
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceOutcome {
    pub storage: StorageOutcome,
    pub metadata: MetadataOutcome,
}

/// Best-effort persistence of the upload. Neither collaborator failure ever
/// propagates: the analysis is the product, persistence is bookkeeping.
pub struct PersistenceService {
    store: Option<Arc<dyn DocumentStore>>,
    sink: Option<Arc<dyn MetadataSink>>,
}

impl PersistenceService {
    pub fn new(store: Option<Arc<dyn DocumentStore>>, sink: Option<Arc<dyn MetadataSink>>) -> Self {
        Self { store, sink }
    }

    pub fn disabled() -> Self {
        Self {
            store: None,
            sink: None,
        }
    }

    pub async fn persist(&self, document: &Document, data: &Bytes) -> PersistenceOutcome {
        let storage = self.store_bytes(document, data).await;
        let metadata = self
            .append_record(document, storage.locator().map(String::from))
            .await;

        PersistenceOutcome { storage, metadata }
    }

    async fn store_bytes(&self, document: &Document, data: &Bytes) -> StorageOutcome {
        let Some(store) = &self.store else {
            return StorageOutcome::Skipped;
        };

        let path = StoragePath::new(&document.id, &document.filename);
        match store.put(&path, data.clone()).await {
            Ok(locator) => {
                tracing::info!(
                    document_id = %document.id.as_uuid(),
                    locator = %locator,
                    "Uploaded document to object store"
                );
                StorageOutcome::Stored(locator)
            }
            Err(e) => {
                tracing::warn!(
                    document_id = %document.id.as_uuid(),
                    error = %e,
                    "Object store upload failed, continuing without storage"
                );
                StorageOutcome::Failed(e.to_string())
            }
        }
    }

    async fn append_record(
        &self,
        document: &Document,
        storage_path: Option<String>,
    ) -> MetadataOutcome {
        let Some(sink) = &self.sink else {
            return MetadataOutcome::Skipped;
        };

        let record = DocumentRecord::from_document(document, storage_path);
        match sink.append(&record).await {
            Ok(()) => {
                tracing::info!(
                    document_id = %record.document_id,
                    "Logged document metadata"
                );
                MetadataOutcome::Logged
            }
            Err(e) => {
                tracing::warn!(
                    document_id = %record.document_id,
                    error = %e,
                    "Metadata logging failed, continuing"
                );
                MetadataOutcome::Failed(e.to_string())
            }
        }
    }
}
