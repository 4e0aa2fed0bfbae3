//! Text generation client for PocketPath
//!
//! The generator is an opaque collaborator: prompt in, Markdown out, or an
//! error whose message is shown to the traveler.

use std::sync::Arc;

use tracing::{debug, warn};

pub mod client;
mod error;
mod gemini;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Supports "gemini" and "openai" providers.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "gemini" => {
            debug!("create_client: creating Gemini client");
            Ok(Arc::new(GeminiClient::from_config(config)?))
        }
        "openai" => {
            debug!("create_client: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: gemini, openai",
                other
            )))
        }
    }
}

/// Generate text for a prompt
///
/// A response cut off at the token cap is still returned, flagged by
/// [`CompletionResponse::is_truncated`].
pub async fn generate(
    llm: &Arc<dyn LlmClient>,
    prompt: &str,
    max_tokens: Option<u32>,
) -> Result<CompletionResponse, LlmError> {
    debug!(prompt_len = prompt.len(), ?max_tokens, "generate: called");
    let response = llm.complete(CompletionRequest::new(prompt, max_tokens)).await?;
    if response.is_truncated() {
        warn!(llm = %llm.describe(), content_len = response.content.len(), "generate: output truncated at token cap");
    }
    debug!(content_len = response.content.len(), stop_reason = ?response.stop_reason, "generate: done");
    Ok(response)
}
