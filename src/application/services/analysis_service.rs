use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{
    ExtractionError, GenerativeClient, GenerativeError, TextExtractor,
};
use crate::application::services::persistence::{PersistenceOutcome, PersistenceService};
use crate::application::services::prompt::{analysis_prompt, PromptSettings};
use crate::domain::{display_extension, Document, FileKind, KnowledgeBase};

pub struct AnalysisOutcome {
    pub document: Document,
    pub document_text: String,
    pub analysis: String,
    pub persistence: PersistenceOutcome,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("no extractable text in document")]
    NoExtractableText,
    #[error(transparent)]
    Generation(#[from] GenerativeError),
}

/// The upload pipeline: extract text, persist best-effort, build the analysis
/// prompt, call the model. Extraction and generation failures fail the
/// request; persistence failures never do.
pub struct AnalysisService<E, G>
where
    E: TextExtractor,
    G: GenerativeClient,
{
    extractor: Arc<E>,
    generative: Arc<G>,
    persistence: PersistenceService,
    knowledge_base: Arc<KnowledgeBase>,
    prompt_settings: PromptSettings,
}

impl<E, G> AnalysisService<E, G>
where
    E: TextExtractor,
    G: GenerativeClient,
{
    pub fn new(
        extractor: Arc<E>,
        generative: Arc<G>,
        persistence: PersistenceService,
        knowledge_base: Arc<KnowledgeBase>,
        prompt_settings: PromptSettings,
    ) -> Self {
        Self {
            extractor,
            generative,
            persistence,
            knowledge_base,
            prompt_settings,
        }
    }

    #[tracing::instrument(skip(self, data), fields(filename = %filename, bytes = data.len()))]
    pub async fn analyze(
        &self,
        data: Bytes,
        filename: &str,
        language: &str,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let kind = FileKind::from_filename(filename).ok_or_else(|| {
            ExtractionError::UnsupportedFileType(display_extension(filename))
        })?;

        let document = Document::new(filename.to_string(), kind, data.len() as u64);

        let document_text = self.extractor.extract(&data, &document).await?;
        if document_text.trim().is_empty() {
            return Err(AnalysisError::NoExtractableText);
        }

        tracing::debug!(
            document_id = %document.id.as_uuid(),
            chars = document_text.chars().count(),
            "Text extracted"
        );

        let persistence = self.persistence.persist(&document, &data).await;

        let prompt = analysis_prompt(
            &document_text,
            language,
            &self.knowledge_base,
            &self.prompt_settings,
        );
        let analysis = self.generative.generate(&prompt).await?;

        tracing::info!(
            document_id = %document.id.as_uuid(),
            "Document analysis complete"
        );

        Ok(AnalysisOutcome {
            document,
            document_text,
            analysis,
            persistence,
        })
    }
}
