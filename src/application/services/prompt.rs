use crate::domain::KnowledgeBase;

/// Character budgets for the two variable-length prompt sections. Budgets keep
/// the assembled prompt under the model's input-token ceiling; the exact
/// values are tunable, not a contract.
#[derive(Debug, Clone, Copy)]
pub struct PromptSettings {
    pub document_budget_chars: usize,
    pub knowledge_budget_chars: usize,
}

pub const DEFAULT_DOCUMENT_BUDGET: usize = 24_000;
pub const DEFAULT_KNOWLEDGE_BUDGET: usize = 16_000;

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            document_budget_chars: DEFAULT_DOCUMENT_BUDGET,
            knowledge_budget_chars: DEFAULT_KNOWLEDGE_BUDGET,
        }
    }
}

/// Builds the fixed-template analysis prompt: task instructions, the
/// four-section output contract, the knowledge-base excerpt, and the document
/// text, the latter two capped to their character budgets.
pub fn analysis_prompt(
    document_text: &str,
    language: &str,
    knowledge_base: &KnowledgeBase,
    settings: &PromptSettings,
) -> String {
    let knowledge = truncate_chars(knowledge_base.text(), settings.knowledge_budget_chars);
    let document = truncate_chars(document_text, settings.document_budget_chars);

    format!(
        "You are an expert Indian legal assistant. Analyze the user's document based on the \
         provided legal knowledge base. Provide a structured breakdown in {language}. The output \
         must strictly follow this format: ### Summary, ### Risk Analysis, ### Key Clauses & \
         Legal Connections, ### Potential Mistakes & Ambiguities.\n\n\
         When generating the '### Key Clauses & Legal Connections' section, you MUST refer to \
         the following legal texts to identify relevant clauses and articles. Cite the specific \
         section or article number (e.g., BNS Section 101, Article 14 of the Indian \
         Constitution).\n\n\
         --- LEGAL KNOWLEDGE BASE ---\n\
         {knowledge}\n\
         --- END KNOWLEDGE BASE ---\n\n\
         --- USER'S DOCUMENT ---\n\
         {document}\n\
         --- END DOCUMENT ---\n"
    )
}

/// Truncates to at most `max_chars` characters, never splitting a UTF-8
/// sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_short_text_when_truncating_then_unchanged() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn given_long_text_when_truncating_then_cut_at_char_count() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn given_multibyte_text_when_truncating_then_boundary_is_respected() {
        // Each character below is multiple bytes; a byte-index cut would panic.
        assert_eq!(truncate_chars("ααββ", 2), "αα");
    }

    #[test]
    fn given_budgets_when_building_prompt_then_sections_are_capped() {
        let kb = KnowledgeBase::new("k".repeat(100));
        let settings = PromptSettings {
            document_budget_chars: 10,
            knowledge_budget_chars: 20,
        };
        let prompt = analysis_prompt(&"d".repeat(100), "English", &kb, &settings);

        assert!(prompt.contains(&"k".repeat(20)));
        assert!(!prompt.contains(&"k".repeat(21)));
        assert!(prompt.contains(&"d".repeat(10)));
        assert!(!prompt.contains(&"d".repeat(11)));
    }

    #[test]
    fn given_language_when_building_prompt_then_language_is_requested() {
        let prompt = analysis_prompt(
            "text",
            "Hindi",
            &KnowledgeBase::empty(),
            &PromptSettings::default(),
        );
        assert!(prompt.contains("structured breakdown in Hindi"));
        assert!(prompt.contains("### Summary"));
        assert!(prompt.contains("### Potential Mistakes & Ambiguities"));
    }
}
