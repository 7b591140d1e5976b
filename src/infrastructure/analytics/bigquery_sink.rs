use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{DocumentRecord, MetadataSink, MetadataSinkError};
use crate::infrastructure::gcp::GcpTokenProvider;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Streams one metadata row per upload into a BigQuery table via the
/// `tabledata.insertAll` API. The collaborator reports per-row errors in the
/// response body; any of them makes the append a failure.
pub struct BigQueryMetadataSink {
    client: Client,
    tokens: Arc<GcpTokenProvider>,
    insert_url: String,
}

impl BigQueryMetadataSink {
    pub fn new(
        tokens: Arc<GcpTokenProvider>,
        project_id: &str,
        dataset: &str,
        table: &str,
    ) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            tokens,
            insert_url: format!(
                "https://bigquery.googleapis.com/bigquery/v2/projects/{project_id}/datasets/{dataset}/tables/{table}/insertAll"
            ),
        }
    }
}

#[async_trait]
impl MetadataSink for BigQueryMetadataSink {
    #[tracing::instrument(skip(self, record), fields(document_id = %record.document_id))]
    async fn append(&self, record: &DocumentRecord) -> Result<(), MetadataSinkError> {
        let token = self
            .tokens
            .token()
            .await
            .map_err(|e| MetadataSinkError::RequestFailed(e.to_string()))?;

        let body = InsertAllRequest {
            rows: vec![Row { json: record }],
        };

        let response = self
            .client
            .post(&self.insert_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| MetadataSinkError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(MetadataSinkError::RequestFailed(format!(
                "BigQuery returned {status}: {text}"
            )));
        }

        let parsed: InsertAllResponse = response
            .json()
            .await
            .map_err(|e| MetadataSinkError::RequestFailed(e.to_string()))?;

        if !parsed.insert_errors.is_empty() {
            return Err(MetadataSinkError::RowsRejected(format!(
                "{:?}",
                parsed.insert_errors
            )));
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct InsertAllRequest<'a> {
    rows: Vec<Row<'a>>,
}

#[derive(Serialize)]
struct Row<'a> {
    json: &'a DocumentRecord,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertAllResponse {
    #[serde(default)]
    insert_errors: Vec<serde_json::Value>,
}
