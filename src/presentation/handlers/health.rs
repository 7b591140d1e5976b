use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::ports::{GenerativeClient, TextExtractor};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub gemini_configured: bool,
    pub storage_configured: bool,
    pub analytics_configured: bool,
}

pub async fn health_handler<E, G>(State(state): State<AppState<E, G>>) -> impl IntoResponse
where
    E: TextExtractor + 'static,
    G: GenerativeClient + 'static,
{
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            message: "Document analysis server is running".to_string(),
            gemini_configured: state.settings.gemini_configured(),
            storage_configured: state.settings.storage_configured(),
            analytics_configured: state.settings.analytics_configured(),
        }),
    )
}
