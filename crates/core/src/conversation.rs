//! Chat history shaping for the text-generation API.
//!
//! The Messages API requires strictly alternating `user` / `assistant` turns
//! starting with `user`. Stored chats may contain prompts that never got a
//! response; those are dropped when replaying history.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A stored prompt and its response, if one was recorded.
#[derive(Debug, Clone, Copy)]
pub struct Exchange<'a> {
    pub prompt: &'a str,
    pub response: Option<&'a str>,
}

/// Build the message list for a new prompt.
///
/// Completed exchanges are replayed oldest first as user/assistant pairs,
/// followed by `new_prompt`. The result always alternates and always ends
/// with a user message.
pub fn build_history(previous: &[Exchange<'_>], new_prompt: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(previous.len() * 2 + 1);
    for exchange in previous {
        let Some(response) = exchange.response.filter(|r| !r.trim().is_empty()) else {
            continue;
        };
        if exchange.prompt.trim().is_empty() {
            continue;
        }
        messages.push(ChatMessage::user(exchange.prompt));
        messages.push(ChatMessage::assistant(response));
    }
    messages.push(ChatMessage::user(new_prompt));
    messages
}
