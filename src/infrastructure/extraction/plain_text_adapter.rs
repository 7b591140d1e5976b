use async_trait::async_trait;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::{Document, FileKind};

/// Decodes `.txt` uploads as UTF-8, falling back to Latin-1 for legacy
/// single-byte files. Bytes containing NUL are treated as binary rather than
/// decoded into garbage.
pub struct PlainTextAdapter;

#[async_trait]
impl TextExtractor for PlainTextAdapter {
    async fn extract(&self, data: &[u8], document: &Document) -> Result<String, ExtractionError> {
        if document.kind != FileKind::Text {
            return Err(ExtractionError::UnsupportedFileType(
                document.kind.as_extension().to_string(),
            ));
        }

        match std::str::from_utf8(data) {
            Ok(text) => Ok(text.to_string()),
            Err(_) if data.contains(&0) => Err(ExtractionError::DecodeFailed(
                "binary data in text file".to_string(),
            )),
            Err(_) => Ok(data.iter().map(|&b| b as char).collect()),
        }
    }
}
