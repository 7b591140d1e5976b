use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use lexiscan::application::ports::{DocumentStore, MetadataSink, OcrClient};
use lexiscan::application::services::{AnalysisService, ChatService, PersistenceService};
use lexiscan::infrastructure::ai::GeminiClient;
use lexiscan::infrastructure::analytics::BigQueryMetadataSink;
use lexiscan::infrastructure::extraction::CompositeExtractor;
use lexiscan::infrastructure::gcp::{GcpTokenProvider, ServiceAccountKey};
use lexiscan::infrastructure::knowledge::KnowledgeBaseLoader;
use lexiscan::infrastructure::observability::{init_tracing, TracingConfig};
use lexiscan::infrastructure::storage::{GcsDocumentStore, LocalDocumentStore};
use lexiscan::infrastructure::vision::{DisabledOcr, GoogleVisionOcr};
use lexiscan::presentation::config::Settings;
use lexiscan::presentation::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env().context("Failed to read configuration")?;
    init_tracing(TracingConfig::default(), settings.server.port);

    let knowledge_base = Arc::new(KnowledgeBaseLoader::new(&settings.knowledge.dir).load());

    let token_provider = match &settings.gcp.credentials_json {
        Some(json) => {
            let key = ServiceAccountKey::from_json(json)
                .context("Failed to parse GCP service account credentials")?;
            Some(Arc::new(GcpTokenProvider::new(key)))
        }
        None => None,
    };

    let store: Option<Arc<dyn DocumentStore>> =
        match (&settings.storage.bucket, &settings.gcp.credentials_json) {
            (Some(bucket), Some(credentials)) => match GcsDocumentStore::new(bucket, credentials) {
                Ok(store) => Some(Arc::new(store)),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Object store unavailable, uploads will not be persisted"
                    );
                    None
                }
            },
            _ => match &settings.storage.local_dir {
                Some(dir) => match LocalDocumentStore::new(dir.clone()) {
                    Ok(store) => Some(Arc::new(store)),
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "Local store unavailable, uploads will not be persisted"
                        );
                        None
                    }
                },
                None => {
                    tracing::info!("Object store not configured, uploads will not be persisted");
                    None
                }
            },
        };

    let sink: Option<Arc<dyn MetadataSink>> = match (
        &token_provider,
        &settings.gcp.project_id,
        &settings.analytics.dataset,
        &settings.analytics.table,
    ) {
        (Some(tokens), Some(project_id), Some(dataset), Some(table)) => Some(Arc::new(
            BigQueryMetadataSink::new(Arc::clone(tokens), project_id, dataset, table),
        )),
        _ => {
            tracing::info!("Analytics table not configured, metadata will not be logged");
            None
        }
    };

    let ocr: Arc<dyn OcrClient> = match &token_provider {
        Some(tokens) => Arc::new(GoogleVisionOcr::new(Arc::clone(tokens))),
        None => {
            tracing::info!("OCR not configured, image uploads will be rejected");
            Arc::new(DisabledOcr)
        }
    };

    if !settings.gemini_configured() {
        tracing::warn!("GEMINI_API_KEY is not set, analysis and chat requests will fail");
    }

    let extractor = Arc::new(CompositeExtractor::standard(ocr));
    let generative = Arc::new(GeminiClient::new(
        settings.gemini.api_key.clone().unwrap_or_default(),
        settings.gemini.model.clone(),
    ));

    let analysis_service = Arc::new(AnalysisService::new(
        Arc::clone(&extractor),
        Arc::clone(&generative),
        PersistenceService::new(store, sink),
        Arc::clone(&knowledge_base),
        settings.limits.prompt,
    ));
    let chat_service = Arc::new(ChatService::new(
        Arc::clone(&generative),
        settings.limits.history,
    ));

    let state = AppState {
        analysis_service,
        chat_service,
        settings: Arc::new(settings),
    };

    let addr = SocketAddr::new(
        state
            .settings
            .server
            .host
            .parse()
            .context("Invalid SERVER_HOST")?,
        state.settings.server.port,
    );
    let router = create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
