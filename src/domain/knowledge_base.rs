/// Static legal reference text loaded once at process start and shared
/// read-only by every request. Never mutated for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    text: String,
}

impl KnowledgeBase {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn empty() -> Self {
        Self {
            text: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
