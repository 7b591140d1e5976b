use std::time::Duration;

use async_trait::async_trait;
use lopdf::Document as PdfDocument;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::{Document, FileKind};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts PDF text page by page in page order. A page with no extractable
/// text contributes an empty segment; an image-only PDF can legally produce
/// an empty string overall.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(data: &[u8]) -> Result<Vec<String>, ExtractionError> {
        let doc = PdfDocument::load_mem(data)
            .map_err(|e| ExtractionError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let pages = doc
            .get_pages()
            .keys()
            .map(|&page_number| doc.extract_text(&[page_number]).unwrap_or_default())
            .collect();

        Ok(pages)
    }
}

#[async_trait]
impl TextExtractor for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract(&self, data: &[u8], document: &Document) -> Result<String, ExtractionError> {
        if document.kind != FileKind::Pdf {
            return Err(ExtractionError::UnsupportedFileType(
                document.kind.as_extension().to_string(),
            ));
        }

        let owned = data.to_vec();
        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&owned)),
        )
        .await
        .map_err(|_| ExtractionError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| ExtractionError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        Ok(pages.join("\n"))
    }
}
