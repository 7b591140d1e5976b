use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{OcrClient, OcrError, TextAnnotation};
use crate::infrastructure::gcp::GcpTokenProvider;

const ANNOTATE_URL: &str = "https://vision.googleapis.com/v1/images:annotate";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Google Cloud Vision text detection. Sends the raw image bytes base64-coded
/// and returns the detected annotations in the order the service reports
/// them (full-image annotation first).
pub struct GoogleVisionOcr {
    client: Client,
    tokens: Arc<GcpTokenProvider>,
}

impl GoogleVisionOcr {
    pub fn new(tokens: Arc<GcpTokenProvider>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self { client, tokens }
    }
}

#[async_trait]
impl OcrClient for GoogleVisionOcr {
    #[tracing::instrument(skip(self, image), fields(image_bytes = image.len()))]
    async fn detect_text(&self, image: &[u8]) -> Result<Vec<TextAnnotation>, OcrError> {
        let token = self
            .tokens
            .token()
            .await
            .map_err(|e| OcrError::RequestFailed(e.to_string()))?;

        let body = serde_json::json!({
            "requests": [{
                "image": { "content": general_purpose::STANDARD.encode(image) },
                "features": [{ "type": "TEXT_DETECTION" }],
            }]
        });

        let response = self
            .client
            .post(ANNOTATE_URL)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| OcrError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(OcrError::RequestFailed(format!(
                "Vision returned {status}: {text}"
            )));
        }

        let parsed: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| OcrError::RequestFailed(e.to_string()))?;

        let image_response = parsed
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| OcrError::ServiceError("empty annotate response".to_string()))?;

        if let Some(error) = image_response.error {
            return Err(OcrError::ServiceError(error.message));
        }

        Ok(image_response
            .text_annotations
            .into_iter()
            .map(|a| TextAnnotation {
                description: a.description,
            })
            .collect())
    }
}

/// OCR stand-in wired when GCP credentials are absent: image uploads surface
/// a configuration error instead of being silently skipped.
pub struct DisabledOcr;

#[async_trait]
impl OcrClient for DisabledOcr {
    async fn detect_text(&self, _image: &[u8]) -> Result<Vec<TextAnnotation>, OcrError> {
        Err(OcrError::NotConfigured)
    }
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    text_annotations: Vec<TextAnnotationDto>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct TextAnnotationDto {
    description: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    message: String,
}
