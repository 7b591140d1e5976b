mod loader;

pub use loader::{KnowledgeBaseLoader, CONSTITUTION_FILE, PENAL_CODE_FILE};
