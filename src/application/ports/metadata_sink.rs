use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Document;

/// One row of the analytics table, shaped for the collaborator's row-insert
/// API.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocumentRecord {
    pub document_id: String,
    pub filename: String,
    pub file_type: String,
    pub file_size: u64,
    pub upload_timestamp: DateTime<Utc>,
    pub status: String,
    pub storage_path: Option<String>,
}

impl DocumentRecord {
    pub fn from_document(document: &Document, storage_path: Option<String>) -> Self {
        Self {
            document_id: document.id.as_uuid().to_string(),
            filename: document.filename.clone(),
            file_type: document.kind.as_extension().to_string(),
            file_size: document.size_bytes,
            upload_timestamp: document.uploaded_at,
            status: document.status.as_str().to_string(),
            storage_path,
        }
    }
}

#[async_trait]
pub trait MetadataSink: Send + Sync {
    async fn append(&self, record: &DocumentRecord) -> Result<(), MetadataSinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MetadataSinkError {
    #[error("insert request failed: {0}")]
    RequestFailed(String),
    #[error("rows rejected: {0}")]
    RowsRejected(String),
}
