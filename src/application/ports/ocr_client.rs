use async_trait::async_trait;

/// One block of text the OCR collaborator detected in an image. The first
/// annotation covers the full image; later ones are individual regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAnnotation {
    pub description: String,
}

#[async_trait]
pub trait OcrClient: Send + Sync {
    async fn detect_text(&self, image: &[u8]) -> Result<Vec<TextAnnotation>, OcrError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("ocr is not configured")]
    NotConfigured,
    #[error("ocr request failed: {0}")]
    RequestFailed(String),
    #[error("ocr service error: {0}")]
    ServiceError(String),
}
