use async_trait::async_trait;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::{Document, FileKind};

/// Extracts DOCX body text paragraph by paragraph in document order, one
/// newline separator per paragraph.
#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn paragraph_text(paragraph: &Paragraph) -> String {
        let mut text = String::new();
        for child in &paragraph.children {
            match child {
                ParagraphChild::Run(run) => {
                    for run_child in &run.children {
                        if let RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
                ParagraphChild::Hyperlink(link) => {
                    for link_child in &link.children {
                        if let ParagraphChild::Run(run) = link_child {
                            for run_child in &run.children {
                                if let RunChild::Text(t) = run_child {
                                    text.push_str(&t.text);
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        text
    }
}

#[async_trait]
impl TextExtractor for DocxAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract(&self, data: &[u8], document: &Document) -> Result<String, ExtractionError> {
        if document.kind != FileKind::Docx {
            return Err(ExtractionError::UnsupportedFileType(
                document.kind.as_extension().to_string(),
            ));
        }

        let docx = docx_rs::read_docx(data)
            .map_err(|e| ExtractionError::ExtractionFailed(format!("failed to parse DOCX: {e}")))?;

        let mut paragraphs = Vec::new();
        for child in &docx.document.children {
            if let DocumentChild::Paragraph(paragraph) = child {
                paragraphs.push(Self::paragraph_text(paragraph));
            }
        }

        tracing::info!(
            paragraph_count = paragraphs.len(),
            "DOCX text extraction complete"
        );

        Ok(paragraphs.join("\n"))
    }
}
