use std::sync::Arc;

use crate::application::ports::{GenerativeClient, GenerativeError};
use crate::domain::ChatTurn;

/// Caps on the client-supplied history. The caller resubmits the full growing
/// conversation on every request, so without a cap the replayed prompt grows
/// without bound.
#[derive(Debug, Clone, Copy)]
pub struct HistoryLimits {
    pub max_turns: usize,
    pub max_chars: usize,
}

pub const DEFAULT_MAX_TURNS: usize = 64;
pub const DEFAULT_MAX_CHARS: usize = 100_000;

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("no chat history provided")]
    EmptyHistory,
    #[error("last history turn contains no question text")]
    EmptyQuestion,
    #[error("chat history exceeds {max_turns} turns or {max_chars} characters")]
    HistoryTooLarge {
        max_turns: usize,
        max_chars: usize,
    },
    #[error(transparent)]
    Generation(#[from] GenerativeError),
}

/// Stateless chat continuation: all turns but the last replay prior context,
/// the last turn is the new question, wrapped in a language instruction.
pub struct ChatService<G>
where
    G: GenerativeClient,
{
    generative: Arc<G>,
    limits: HistoryLimits,
}

impl<G> ChatService<G>
where
    G: GenerativeClient,
{
    pub fn new(generative: Arc<G>, limits: HistoryLimits) -> Self {
        Self { generative, limits }
    }

    #[tracing::instrument(skip(self, history), fields(turns = history.len()))]
    pub async fn continue_chat(
        &self,
        history: &[ChatTurn],
        language: &str,
    ) -> Result<String, ChatError> {
        let (question_turn, replay) = history.split_last().ok_or(ChatError::EmptyHistory)?;

        let total_chars: usize = history.iter().map(ChatTurn::text_len).sum();
        if history.len() > self.limits.max_turns || total_chars > self.limits.max_chars {
            return Err(ChatError::HistoryTooLarge {
                max_turns: self.limits.max_turns,
                max_chars: self.limits.max_chars,
            });
        }

        let question = question_turn
            .parts
            .first()
            .map(|part| part.text.trim())
            .filter(|text| !text.is_empty())
            .ok_or(ChatError::EmptyQuestion)?;

        let message = format!(
            "Based on the document context I provided earlier, answer this question in \
             {language}: {question}"
        );

        let reply = self.generative.chat(replay, &message).await?;

        tracing::info!(replayed_turns = replay.len(), "Chat turn answered");

        Ok(reply)
    }
}
