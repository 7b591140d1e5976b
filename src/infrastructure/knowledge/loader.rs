use std::path::PathBuf;

use crate::domain::KnowledgeBase;

pub const PENAL_CODE_FILE: &str = "bns_knowledge_base.txt";
pub const CONSTITUTION_FILE: &str = "indian_constitution.txt";

/// Loads the two static legal reference texts at process start. A missing
/// file degrades the knowledge base rather than failing startup; legal
/// connections in the analysis just get less specific.
pub struct KnowledgeBaseLoader {
    dir: PathBuf,
}

impl KnowledgeBaseLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn load(&self) -> KnowledgeBase {
        let penal_code = self.read_section(PENAL_CODE_FILE);
        let constitution = self.read_section(CONSTITUTION_FILE);

        if penal_code.is_none() && constitution.is_none() {
            return KnowledgeBase::empty();
        }

        let text = format!(
            "--- BHARATIYA NYAYA SANHITA (BNS) ---\n{}\n\n--- INDIAN CONSTITUTION ---\n{}",
            penal_code.unwrap_or_default(),
            constitution.unwrap_or_default(),
        );

        KnowledgeBase::new(text)
    }

    fn read_section(&self, filename: &str) -> Option<String> {
        let path = self.dir.join(filename);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                tracing::info!(file = %path.display(), chars = text.chars().count(), "Knowledge base file loaded");
                Some(text)
            }
            Err(e) => {
                tracing::warn!(
                    file = %path.display(),
                    error = %e,
                    "Knowledge base file not loaded, legal connections may be less specific"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_both_files_when_loading_then_sections_are_bannered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PENAL_CODE_FILE), "Section 101: theft").unwrap();
        std::fs::write(dir.path().join(CONSTITUTION_FILE), "Article 14: equality").unwrap();

        let kb = KnowledgeBaseLoader::new(dir.path()).load();

        assert!(kb.text().contains("--- BHARATIYA NYAYA SANHITA (BNS) ---"));
        assert!(kb.text().contains("Section 101: theft"));
        assert!(kb.text().contains("--- INDIAN CONSTITUTION ---"));
        assert!(kb.text().contains("Article 14: equality"));
    }

    #[test]
    fn given_missing_files_when_loading_then_knowledge_base_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let kb = KnowledgeBaseLoader::new(dir.path()).load();
        assert!(kb.is_empty());
    }

    #[test]
    fn given_one_missing_file_when_loading_then_other_section_survives() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONSTITUTION_FILE), "Article 21").unwrap();

        let kb = KnowledgeBaseLoader::new(dir.path()).load();

        assert!(!kb.is_empty());
        assert!(kb.text().contains("Article 21"));
    }
}
