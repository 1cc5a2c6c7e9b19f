//! Anthropic Messages API client.

use std::time::Duration;

use async_trait::async_trait;
use guardian_core::conversation::ChatMessage;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::GenerationError;
use crate::generator::{GenerationRequest, TextGenerator};

/// Value of the `anthropic-version` header.
pub const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesBody<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct MessagesReply {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Concatenate the text blocks of a reply.
fn reply_text(reply: MessagesReply) -> Result<String, GenerationError> {
    let text: String = reply
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .map(|block| block.text)
        .collect();
    if text.trim().is_empty() {
        return Err(GenerationError::EmptyReply);
    }
    Ok(text)
}

/// [`TextGenerator`] backed by `POST /v1/messages`.
#[derive(Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl AnthropicClient {
    pub fn new(config: LlmConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = MessagesBody {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: request.system.as_deref(),
            temperature: request.temperature,
            messages: &request.messages,
        };

        tracing::debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            "Sending generation request",
        );

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        reply_text(response.json::<MessagesReply>().await?)
    }
}
