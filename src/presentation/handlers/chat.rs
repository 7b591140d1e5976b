use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::ports::{GenerativeClient, TextExtractor};
use crate::application::services::ChatError;
use crate::domain::ChatTurn;
use crate::presentation::state::AppState;

fn default_language() -> String {
    "English".to_string()
}

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, request), fields(turns = request.history.len()))]
pub async fn chat_handler<E, G>(
    State(state): State<AppState<E, G>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse
where
    E: TextExtractor + 'static,
    G: GenerativeClient + 'static,
{
    match state
        .chat_service
        .continue_chat(&request.history, &request.language)
        .await
    {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { response: reply })).into_response(),
        Err(e) => {
            let status = match e {
                ChatError::EmptyHistory
                | ChatError::EmptyQuestion
                | ChatError::HistoryTooLarge { .. } => StatusCode::BAD_REQUEST,
                ChatError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            if status.is_server_error() {
                tracing::error!(error = %e, "Chat continuation failed");
            } else {
                tracing::warn!(error = %e, "Chat request rejected");
            }
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
