use std::sync::{Arc, Mutex};

use bytes::Bytes;

use lexiscan::application::ports::{
    DocumentRecord, DocumentStore, DocumentStoreError, ExtractionError, GenerativeClient,
    GenerativeError, MetadataSink, MetadataSinkError, TextExtractor,
};
use lexiscan::application::services::{
    AnalysisError, AnalysisService, MetadataOutcome, PersistenceService, PromptSettings,
    StorageOutcome,
};
use lexiscan::domain::{Document, KnowledgeBase, StoragePath};

struct StubExtractor {
    text: String,
}

#[async_trait::async_trait]
impl TextExtractor for StubExtractor {
    async fn extract(&self, _data: &[u8], _document: &Document) -> Result<String, ExtractionError> {
        Ok(self.text.clone())
    }
}

struct CapturingGenerativeClient {
    prompts: Mutex<Vec<String>>,
    response: Result<String, GenerativeError>,
}

impl CapturingGenerativeClient {
    fn ok(response: &str) -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            response: Ok(response.to_string()),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            prompts: Mutex::new(Vec::new()),
            response: Err(GenerativeError::ApiRequestFailed("quota".to_string())),
        })
    }
}

#[async_trait::async_trait]
impl GenerativeClient for CapturingGenerativeClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerativeError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(GenerativeError::ApiRequestFailed(m)) => {
                Err(GenerativeError::ApiRequestFailed(m.clone()))
            }
            Err(_) => Err(GenerativeError::MissingApiKey),
        }
    }

    async fn chat(
        &self,
        _history: &[lexiscan::domain::ChatTurn],
        _message: &str,
    ) -> Result<String, GenerativeError> {
        Ok("unused".to_string())
    }
}

struct WorkingDocumentStore;

#[async_trait::async_trait]
impl DocumentStore for WorkingDocumentStore {
    async fn put(&self, path: &StoragePath, _data: Bytes) -> Result<String, DocumentStoreError> {
        Ok(format!("gs://test-bucket/{}", path.as_str()))
    }
}

struct FailingDocumentStore;

#[async_trait::async_trait]
impl DocumentStore for FailingDocumentStore {
    async fn put(&self, _path: &StoragePath, _data: Bytes) -> Result<String, DocumentStoreError> {
        Err(DocumentStoreError::UploadFailed("bucket offline".to_string()))
    }
}

struct RecordingMetadataSink {
    records: Mutex<Vec<DocumentRecord>>,
}

impl RecordingMetadataSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl MetadataSink for RecordingMetadataSink {
    async fn append(&self, record: &DocumentRecord) -> Result<(), MetadataSinkError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

struct FailingMetadataSink;

#[async_trait::async_trait]
impl MetadataSink for FailingMetadataSink {
    async fn append(&self, _record: &DocumentRecord) -> Result<(), MetadataSinkError> {
        Err(MetadataSinkError::RowsRejected("schema mismatch".to_string()))
    }
}

fn service(
    text: &str,
    generative: Arc<CapturingGenerativeClient>,
    persistence: PersistenceService,
) -> AnalysisService<StubExtractor, CapturingGenerativeClient> {
    AnalysisService::new(
        Arc::new(StubExtractor {
            text: text.to_string(),
        }),
        generative,
        persistence,
        Arc::new(KnowledgeBase::new("BNS Section 101".to_string())),
        PromptSettings::default(),
    )
}

#[tokio::test]
async fn given_unsupported_extension_when_analyzing_then_unsupported_error() {
    let service = service(
        "ignored",
        CapturingGenerativeClient::ok("analysis"),
        PersistenceService::disabled(),
    );

    let result = service
        .analyze(Bytes::from_static(b"a,b"), "table.csv", "English")
        .await;

    assert!(matches!(
        result,
        Err(AnalysisError::Extraction(
            ExtractionError::UnsupportedFileType(_)
        ))
    ));
}

#[tokio::test]
async fn given_supported_upload_when_analyzing_then_outcome_has_all_fields() {
    let generative = CapturingGenerativeClient::ok("### Summary\nFine.");
    let service = service(
        "the agreement text",
        Arc::clone(&generative),
        PersistenceService::disabled(),
    );

    let outcome = service
        .analyze(Bytes::from_static(b"raw"), "agreement.txt", "English")
        .await
        .unwrap();

    assert_eq!(outcome.analysis, "### Summary\nFine.");
    assert_eq!(outcome.document_text, "the agreement text");
    assert_eq!(outcome.document.filename, "agreement.txt");
    assert_eq!(outcome.persistence.storage, StorageOutcome::Skipped);
    assert_eq!(outcome.persistence.metadata, MetadataOutcome::Skipped);

    let prompts = generative.prompts.lock().unwrap();
    assert!(prompts[0].contains("the agreement text"));
    assert!(prompts[0].contains("BNS Section 101"));
    assert!(prompts[0].contains("structured breakdown in English"));
}

#[tokio::test]
async fn given_working_store_when_analyzing_then_locator_reaches_metadata_row() {
    let sink = RecordingMetadataSink::new();
    let service = service(
        "text",
        CapturingGenerativeClient::ok("analysis"),
        PersistenceService::new(
            Some(Arc::new(WorkingDocumentStore)),
            Some(Arc::clone(&sink) as Arc<dyn MetadataSink>),
        ),
    );

    let outcome = service
        .analyze(Bytes::from_static(b"raw"), "deed.txt", "English")
        .await
        .unwrap();

    let locator = outcome.persistence.storage.locator().unwrap().to_string();
    assert!(locator.starts_with("gs://test-bucket/uploads/"));
    assert!(locator.ends_with("/deed.txt"));

    let records = sink.records.lock().unwrap();
    assert_eq!(records[0].storage_path.as_deref(), Some(locator.as_str()));
    assert_eq!(records[0].status, "UPLOADED");
}

#[tokio::test]
async fn given_failing_store_when_analyzing_then_analysis_still_succeeds() {
    let sink = RecordingMetadataSink::new();
    let service = service(
        "text",
        CapturingGenerativeClient::ok("analysis"),
        PersistenceService::new(
            Some(Arc::new(FailingDocumentStore)),
            Some(Arc::clone(&sink) as Arc<dyn MetadataSink>),
        ),
    );

    let outcome = service
        .analyze(Bytes::from_static(b"raw"), "deed.txt", "English")
        .await
        .unwrap();

    assert!(matches!(
        outcome.persistence.storage,
        StorageOutcome::Failed(_)
    ));
    assert_eq!(sink.records.lock().unwrap()[0].storage_path, None);
}

#[tokio::test]
async fn given_failing_sink_when_analyzing_then_analysis_still_succeeds() {
    let service = service(
        "text",
        CapturingGenerativeClient::ok("analysis"),
        PersistenceService::new(None, Some(Arc::new(FailingMetadataSink))),
    );

    let outcome = service
        .analyze(Bytes::from_static(b"raw"), "deed.txt", "English")
        .await
        .unwrap();

    assert!(matches!(
        outcome.persistence.metadata,
        MetadataOutcome::Failed(_)
    ));
    assert_eq!(outcome.analysis, "analysis");
}

#[tokio::test]
async fn given_blank_extraction_when_analyzing_then_no_extractable_text() {
    let service = service(
        "  \n ",
        CapturingGenerativeClient::ok("analysis"),
        PersistenceService::disabled(),
    );

    let result = service
        .analyze(Bytes::from_static(b"raw"), "scan.txt", "English")
        .await;

    assert!(matches!(result, Err(AnalysisError::NoExtractableText)));
}

#[tokio::test]
async fn given_generation_failure_when_analyzing_then_error_propagates() {
    let service = service(
        "text",
        CapturingGenerativeClient::failing(),
        PersistenceService::disabled(),
    );

    let result = service
        .analyze(Bytes::from_static(b"raw"), "deed.txt", "English")
        .await;

    assert!(matches!(
        result,
        Err(AnalysisError::Generation(
            GenerativeError::ApiRequestFailed(_)
        ))
    ));
}
