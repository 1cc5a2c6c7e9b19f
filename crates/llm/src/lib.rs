//! Text generation for chat and the armor optimizer.
//!
//! Callers depend on the [`TextGenerator`] trait; [`AnthropicClient`] is the
//! production implementation backed by the Anthropic Messages API.

pub mod anthropic;
pub mod config;
pub mod error;
pub mod generator;

pub use anthropic::AnthropicClient;
pub use config::LlmConfig;
pub use error::GenerationError;
pub use generator::{GenerationRequest, TextGenerator};
