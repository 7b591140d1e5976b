mod document_store;
mod generative_client;
mod metadata_sink;
mod ocr_client;
mod text_extractor;

pub use document_store::{DocumentStore, DocumentStoreError};
pub use generative_client::{GenerativeClient, GenerativeError};
pub use metadata_sink::{DocumentRecord, MetadataSink, MetadataSinkError};
pub use ocr_client::{OcrClient, OcrError, TextAnnotation};
pub use text_extractor::{ExtractionError, TextExtractor};
