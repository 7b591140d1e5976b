mod google_vision_ocr;

pub use google_vision_ocr::{DisabledOcr, GoogleVisionOcr};
