use std::sync::Arc;

use crate::application::ports::{GenerativeClient, TextExtractor};
use crate::application::services::{AnalysisService, ChatService};
use crate::presentation::config::Settings;

pub struct AppState<E, G>
where
    E: TextExtractor,
    G: GenerativeClient,
{
    pub analysis_service: Arc<AnalysisService<E, G>>,
    pub chat_service: Arc<ChatService<G>>,
    pub settings: Arc<Settings>,
}

impl<E, G> Clone for AppState<E, G>
where
    E: TextExtractor,
    G: GenerativeClient,
{
    fn clone(&self) -> Self {
        Self {
            analysis_service: Arc::clone(&self.analysis_service),
            chat_service: Arc::clone(&self.chat_service),
            settings: Arc::clone(&self.settings),
        }
    }
}
