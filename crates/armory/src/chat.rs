//! Free-form chat with per-author history.

use std::sync::Arc;

use guardian_core::conversation::{build_history, Exchange};
use guardian_core::prompt::CHAT_SYSTEM_PROMPT;
use guardian_core::types::DbId;
use guardian_db::models::chat::Chat;
use guardian_db::repositories::ChatRepo;
use guardian_db::DbPool;
use guardian_llm::{GenerationRequest, TextGenerator};

use crate::error::ChatError;

/// Chat replies are deterministic.
const CHAT_TEMPERATURE: f32 = 0.0;

/// Answered exchanges replayed as context on each send.
pub const CHAT_HISTORY_LIMIT: i64 = 20;

#[derive(Clone)]
pub struct ChatService {
    pool: DbPool,
    generator: Arc<dyn TextGenerator>,
}

impl ChatService {
    pub fn new(pool: DbPool, generator: Arc<dyn TextGenerator>) -> Self {
        Self { pool, generator }
    }

    /// Store `prompt`, answer it with the author's most recent answered
    /// exchanges as context, store the answer and return the completed chat.
    ///
    /// The prompt row is kept even when generation fails, so the author's
    /// history shows the unanswered prompt.
    pub async fn send(&self, author_id: DbId, prompt: &str) -> Result<Chat, ChatError> {
        let previous = ChatRepo::recent_answered(&self.pool, author_id, CHAT_HISTORY_LIMIT).await?;
        let chat = ChatRepo::create(&self.pool, author_id, prompt).await?;

        let exchanges: Vec<Exchange<'_>> = previous
            .iter()
            .map(|c| Exchange {
                prompt: &c.prompt,
                response: c.response.as_deref(),
            })
            .collect();

        let request = GenerationRequest {
            system: Some(CHAT_SYSTEM_PROMPT.to_string()),
            messages: build_history(&exchanges, prompt),
            temperature: None,
        }
        .with_temperature(CHAT_TEMPERATURE);

        let response = self.generator.generate(&request).await?;
        tracing::debug!(author_id, chat_id = %chat.id, history = previous.len(), "Chat answered");

        let answered = ChatRepo::set_response(&self.pool, chat.id, &response)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(answered)
    }
}
