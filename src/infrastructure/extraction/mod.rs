mod composite_extractor;
mod docx_adapter;
mod image_ocr_adapter;
mod pdf_adapter;
mod plain_text_adapter;

pub use composite_extractor::CompositeExtractor;
pub use docx_adapter::DocxAdapter;
pub use image_ocr_adapter::{ImageOcrAdapter, NO_TEXT_SENTINEL};
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
