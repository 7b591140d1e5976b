mod chat;
mod document;
mod knowledge_base;
mod storage_path;

pub use chat::{ChatPart, ChatRole, ChatTurn};
pub use document::{display_extension, Document, DocumentId, DocumentStatus, FileKind};
pub use knowledge_base::KnowledgeBase;
pub use storage_path::StoragePath;
