use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{GenerativeClient, GenerativeError};
use crate::domain::ChatTurn;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// Client for the Gemini `generateContent` endpoint. Single-turn analysis
/// sends one user content; chat continuation replays the caller's history as
/// the `contents` list with the new message appended. No internal retries:
/// collaborator errors surface to the caller.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    async fn post_generate(&self, contents: Vec<Content>) -> Result<String, GenerativeError> {
        if self.api_key.is_empty() {
            return Err(GenerativeError::MissingApiKey);
        }

        let url = format!("{BASE_URL}/models/{}:generateContent", self.model);
        let body = GenerateContentRequest { contents };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerativeError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GenerativeError::ApiRequestFailed(format!(
                "Gemini returned {status}: {text}"
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerativeError::InvalidResponse(e.to_string()))?;

        parsed.first_text().ok_or_else(|| {
            GenerativeError::InvalidResponse("response contained no candidate text".to_string())
        })
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.chars().count()))]
    async fn generate(&self, prompt: &str) -> Result<String, GenerativeError> {
        self.post_generate(vec![Content::user(prompt)]).await
    }

    #[tracing::instrument(skip(self, history, message), fields(model = %self.model, replayed_turns = history.len()))]
    async fn chat(&self, history: &[ChatTurn], message: &str) -> Result<String, GenerativeError> {
        let mut contents: Vec<Content> = history.iter().map(Content::from_turn).collect();
        contents.push(Content::user(message));
        self.post_generate(contents).await
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }

    fn from_turn(turn: &ChatTurn) -> Self {
        Self {
            role: turn.role.as_str().to_string(),
            parts: turn
                .parts
                .iter()
                .map(|p| Part {
                    text: p.text.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChatRole;

    #[test]
    fn given_candidate_response_when_parsing_then_first_part_text_is_taken() {
        let json = r####"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "### Summary"}]}}
            ]
        }"####;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.first_text().as_deref(), Some("### Summary"));
    }

    #[test]
    fn given_empty_candidates_when_parsing_then_no_text() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.first_text().is_none());
    }

    #[test]
    fn given_history_turn_when_mapping_then_wire_role_matches() {
        let turn = ChatTurn::model("earlier analysis");
        let content = Content::from_turn(&turn);
        assert_eq!(content.role, "model");
        assert_eq!(content.parts[0].text, "earlier analysis");
        assert_eq!(ChatRole::Model.as_str(), "model");
    }
}
