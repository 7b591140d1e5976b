use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One uploaded document. Created once per request, never mutated afterwards;
/// its lifecycle past the response belongs to the external object store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub kind: FileKind,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
    pub status: DocumentStatus,
}

impl Document {
    pub fn new(filename: String, kind: FileKind, size_bytes: u64) -> Self {
        Self {
            id: DocumentId::new(),
            filename,
            kind,
            size_bytes,
            uploaded_at: Utc::now(),
            status: DocumentStatus::Uploaded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    Uploaded,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Uploaded => "UPLOADED",
        }
    }
}

/// The closed set of file types the extraction pipeline accepts. Dispatch is
/// on the lowercase filename extension; anything else is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Text,
    Pdf,
    Docx,
    Png,
    Jpeg,
}

impl FileKind {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn as_extension(&self) -> &'static str {
        match self {
            Self::Text => ".txt",
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
            Self::Png => ".png",
            Self::Jpeg => ".jpg",
        }
    }
}

/// The extension of `filename` as shown in error messages, dot included.
pub fn display_extension(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((_, extension)) => format!(".{}", extension.to_ascii_lowercase()),
        None => filename.to_string(),
    }
}
