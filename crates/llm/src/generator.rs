use async_trait::async_trait;
use guardian_core::conversation::ChatMessage;

use crate::error::GenerationError;

/// One generation call: optional system framing plus alternating messages
/// ending with a user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// A single user turn under `system`.
    pub fn single(system: &str, prompt: impl Into<String>) -> Self {
        Self {
            system: Some(system.to_string()),
            messages: vec![ChatMessage::user(prompt)],
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A backend that turns a [`GenerationRequest`] into reply text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}
