use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, OcrClient, TextExtractor};
use crate::domain::{Document, FileKind};

use super::docx_adapter::DocxAdapter;
use super::image_ocr_adapter::ImageOcrAdapter;
use super::pdf_adapter::PdfAdapter;
use super::plain_text_adapter::PlainTextAdapter;

/// Dispatches extraction to the adapter registered for the document's kind.
pub struct CompositeExtractor {
    adapters: HashMap<FileKind, Arc<dyn TextExtractor>>,
}

impl CompositeExtractor {
    pub fn new(adapters: Vec<(FileKind, Arc<dyn TextExtractor>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// The full supported-format set: txt, pdf, docx, and both image kinds
    /// routed through the given OCR client.
    pub fn standard(ocr: Arc<dyn OcrClient>) -> Self {
        let image_adapter: Arc<dyn TextExtractor> = Arc::new(ImageOcrAdapter::new(ocr));
        Self::new(vec![
            (FileKind::Text, Arc::new(PlainTextAdapter)),
            (FileKind::Pdf, Arc::new(PdfAdapter::new())),
            (FileKind::Docx, Arc::new(DocxAdapter::new())),
            (FileKind::Png, Arc::clone(&image_adapter)),
            (FileKind::Jpeg, image_adapter),
        ])
    }
}

#[async_trait]
impl TextExtractor for CompositeExtractor {
    async fn extract(&self, data: &[u8], document: &Document) -> Result<String, ExtractionError> {
        let adapter = self.adapters.get(&document.kind).ok_or_else(|| {
            ExtractionError::UnsupportedFileType(document.kind.as_extension().to_string())
        })?;

        adapter.extract(data, document).await
    }
}
