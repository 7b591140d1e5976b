mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnalyticsSettings, GcpSettings, GeminiSettings, KnowledgeSettings, LimitSettings,
    ServerSettings, Settings, SettingsError, StorageSettings,
};
