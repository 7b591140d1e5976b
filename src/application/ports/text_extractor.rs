use async_trait::async_trait;

use crate::domain::Document;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, data: &[u8], document: &Document) -> Result<String, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("failed to decode text: {0}")]
    DecodeFailed(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("image text detection is not configured")]
    OcrUnavailable,
}
