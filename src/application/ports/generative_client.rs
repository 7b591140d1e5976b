use async_trait::async_trait;

use crate::domain::ChatTurn;

/// The generative-AI collaborator. `generate` is a single-turn completion;
/// `chat` replays prior turns to re-establish conversational state before
/// sending one new message.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerativeError>;

    async fn chat(&self, history: &[ChatTurn], message: &str) -> Result<String, GenerativeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GenerativeError {
    #[error("generative API key is not configured")]
    MissingApiKey,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
