use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use crate::application::ports::{ExtractionError, GenerativeClient, TextExtractor};
use crate::application::services::AnalysisError;
use crate::presentation::state::AppState;

const DEFAULT_LANGUAGE: &str = "English";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub analysis: String,
    pub document_text: String,
    pub document_id: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_handler<E, G>(
    State(state): State<AppState<E, G>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    E: TextExtractor + 'static,
    G: GenerativeClient + 'static,
{
    let mut file: Option<(String, Bytes)> = None;
    let mut language = DEFAULT_LANGUAGE.to_string();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart body");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart body: {e}"),
                    }),
                )
                    .into_response();
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = match field.bytes().await {
                    Ok(data) => data,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read file field");
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse {
                                error: format!("Failed to read file: {e}"),
                            }),
                        )
                            .into_response();
                    }
                };
                file = Some((filename, data));
            }
            Some("language") => {
                if let Ok(value) = field.text().await {
                    let value = value.trim().to_string();
                    if !value.is_empty() {
                        language = value;
                    }
                }
            }
            _ => {}
        }
    }

    let Some((filename, data)) = file else {
        tracing::warn!("Analyze request with no file part");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No file part".to_string(),
            }),
        )
            .into_response();
    };

    if filename.is_empty() {
        tracing::warn!("Analyze request with empty filename");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No selected file".to_string(),
            }),
        )
            .into_response();
    }

    let max_bytes = state.settings.limits.max_upload_bytes;
    if data.len() > max_bytes {
        tracing::warn!(bytes = data.len(), max_bytes, "Upload over size ceiling");
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponse {
                error: format!(
                    "File too large. Maximum size is {} MB.",
                    max_bytes / (1024 * 1024)
                ),
            }),
        )
            .into_response();
    }

    match state
        .analysis_service
        .analyze(data, &filename, &language)
        .await
    {
        Ok(outcome) => (
            StatusCode::OK,
            Json(AnalyzeResponse {
                analysis: outcome.analysis,
                document_text: outcome.document_text,
                document_id: outcome.document.id.as_uuid().to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, "Document analysis failed");
            } else {
                tracing::warn!(error = %e, "Document analysis rejected");
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

fn status_for(error: &AnalysisError) -> StatusCode {
    match error {
        AnalysisError::Extraction(
            ExtractionError::UnsupportedFileType(_) | ExtractionError::DecodeFailed(_),
        ) => StatusCode::BAD_REQUEST,
        AnalysisError::NoExtractableText => StatusCode::BAD_REQUEST,
        AnalysisError::Extraction(
            ExtractionError::ExtractionFailed(_) | ExtractionError::OcrUnavailable,
        ) => StatusCode::INTERNAL_SERVER_ERROR,
        AnalysisError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
