use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, OcrClient, OcrError, TextExtractor};
use crate::domain::{Document, FileKind};

/// Returned instead of an error when the OCR collaborator finds nothing in
/// the image.
pub const NO_TEXT_SENTINEL: &str = "No text found in image";

/// Sends image uploads to the OCR collaborator and takes the first
/// (full-image) annotation as the document text.
pub struct ImageOcrAdapter {
    ocr: Arc<dyn OcrClient>,
}

impl ImageOcrAdapter {
    pub fn new(ocr: Arc<dyn OcrClient>) -> Self {
        Self { ocr }
    }
}

#[async_trait]
impl TextExtractor for ImageOcrAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract(&self, data: &[u8], document: &Document) -> Result<String, ExtractionError> {
        if !matches!(document.kind, FileKind::Png | FileKind::Jpeg) {
            return Err(ExtractionError::UnsupportedFileType(
                document.kind.as_extension().to_string(),
            ));
        }

        let annotations = match self.ocr.detect_text(data).await {
            Ok(annotations) => annotations,
            Err(OcrError::NotConfigured) => return Err(ExtractionError::OcrUnavailable),
            Err(e) => return Err(ExtractionError::ExtractionFailed(e.to_string())),
        };

        tracing::info!(
            annotation_count = annotations.len(),
            "Image text detection complete"
        );

        Ok(annotations
            .into_iter()
            .next()
            .map(|a| a.description)
            .unwrap_or_else(|| NO_TEXT_SENTINEL.to_string()))
    }
}
