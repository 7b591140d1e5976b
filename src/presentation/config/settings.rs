use std::path::PathBuf;

use base64::{engine::general_purpose, Engine as _};

use crate::application::services::prompt;
use crate::application::services::{HistoryLimits, PromptSettings};
use crate::infrastructure::ai::DEFAULT_MODEL;

const DEFAULT_MAX_UPLOAD_MB: usize = 10;

/// Immutable process configuration, read from the environment exactly once at
/// startup and shared read-only afterwards. Missing optional values degrade
/// individual features; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub gemini: GeminiSettings,
    pub gcp: GcpSettings,
    pub storage: StorageSettings,
    pub analytics: AnalyticsSettings,
    pub knowledge: KnowledgeSettings,
    pub limits: LimitSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct GcpSettings {
    pub project_id: Option<String>,
    /// Service-account key JSON, decoded from `GCP_CREDENTIALS_BASE64` or
    /// read from the file `GOOGLE_APPLICATION_CREDENTIALS` points at.
    pub credentials_json: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub bucket: Option<String>,
    /// Development fallback: persist uploads to this directory when no GCS
    /// bucket is configured.
    pub local_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AnalyticsSettings {
    pub dataset: Option<String>,
    pub table: Option<String>,
}

#[derive(Debug, Clone)]
pub struct KnowledgeSettings {
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LimitSettings {
    pub max_upload_bytes: usize,
    pub prompt: PromptSettings,
    pub history: HistoryLimits,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
    #[error("unreadable credentials from {source_var}: {reason}")]
    UnreadableCredentials { source_var: String, reason: String },
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let server = ServerSettings {
            host: env_or("SERVER_HOST", "0.0.0.0"),
            port: env_parsed("SERVER_PORT", 3000)?,
        };

        let gemini = GeminiSettings {
            api_key: env_opt("GEMINI_API_KEY"),
            model: env_or("GEMINI_MODEL", DEFAULT_MODEL),
        };

        let gcp = GcpSettings {
            project_id: env_opt("GCP_PROJECT_ID"),
            credentials_json: read_credentials()?,
        };

        let storage = StorageSettings {
            bucket: env_opt("GCS_BUCKET_NAME"),
            local_dir: env_opt("LOCAL_STORAGE_DIR").map(PathBuf::from),
        };

        let analytics = AnalyticsSettings {
            dataset: env_opt("BIGQUERY_DATASET"),
            table: env_opt("BIGQUERY_TABLE"),
        };

        let knowledge = KnowledgeSettings {
            dir: env_or("KNOWLEDGE_BASE_DIR", ".").into(),
        };

        let limits = LimitSettings {
            max_upload_bytes: env_parsed::<usize>("MAX_UPLOAD_MB", DEFAULT_MAX_UPLOAD_MB)?
                * 1024
                * 1024,
            prompt: PromptSettings {
                document_budget_chars: env_parsed(
                    "DOCUMENT_PROMPT_BUDGET",
                    prompt::DEFAULT_DOCUMENT_BUDGET,
                )?,
                knowledge_budget_chars: env_parsed(
                    "KNOWLEDGE_PROMPT_BUDGET",
                    prompt::DEFAULT_KNOWLEDGE_BUDGET,
                )?,
            },
            history: HistoryLimits::default(),
        };

        Ok(Self {
            server,
            gemini,
            gcp,
            storage,
            analytics,
            knowledge,
            limits,
        })
    }

    pub fn gemini_configured(&self) -> bool {
        self.gemini.api_key.is_some()
    }

    pub fn storage_configured(&self) -> bool {
        (self.gcp.credentials_json.is_some() && self.storage.bucket.is_some())
            || self.storage.local_dir.is_some()
    }

    pub fn analytics_configured(&self) -> bool {
        self.gcp.credentials_json.is_some()
            && self.gcp.project_id.is_some()
            && self.analytics.dataset.is_some()
            && self.analytics.table.is_some()
    }
}

fn read_credentials() -> Result<Option<String>, SettingsError> {
    if let Some(encoded) = env_opt("GCP_CREDENTIALS_BASE64") {
        let decoded = general_purpose::STANDARD.decode(encoded.as_bytes()).map_err(|e| {
            SettingsError::UnreadableCredentials {
                source_var: "GCP_CREDENTIALS_BASE64".to_string(),
                reason: e.to_string(),
            }
        })?;
        let json =
            String::from_utf8(decoded).map_err(|e| SettingsError::UnreadableCredentials {
                source_var: "GCP_CREDENTIALS_BASE64".to_string(),
                reason: e.to_string(),
            })?;
        return Ok(Some(json));
    }

    if let Some(path) = env_opt("GOOGLE_APPLICATION_CREDENTIALS") {
        let json =
            std::fs::read_to_string(&path).map_err(|e| SettingsError::UnreadableCredentials {
                source_var: "GOOGLE_APPLICATION_CREDENTIALS".to_string(),
                reason: format!("{path}: {e}"),
            })?;
        return Ok(Some(json));
    }

    Ok(None)
}

fn env_opt(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(var: &str, default: &str) -> String {
    env_opt(var).unwrap_or_else(|| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(var: &str, default: T) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    match env_opt(var) {
        Some(raw) => raw.parse().map_err(|e: T::Err| SettingsError::InvalidValue {
            var: var.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
