mod analysis_service;
mod chat_service;
mod persistence;
pub mod prompt;

pub use analysis_service::{AnalysisError, AnalysisOutcome, AnalysisService};
pub use chat_service::{ChatError, ChatService, HistoryLimits};
pub use persistence::{MetadataOutcome, PersistenceOutcome, PersistenceService, StorageOutcome};
pub use prompt::PromptSettings;
