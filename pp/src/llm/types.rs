//! Request and response types shared by all providers

use serde::{Deserialize, Serialize};

/// A single, stateless generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Full instruction text
    pub prompt: String,
    /// Upper bound on generated tokens; None leaves it to the provider
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: Option<u32>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
        }
    }

    /// The tighter of the request's cap and the client's cap, if either is set
    pub fn effective_max_tokens(&self, client_cap: Option<u32>) -> Option<u32> {
        self.max_tokens.into_iter().chain(client_cap).min()
    }
}

/// Why generation stopped
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StopReason {
    #[default]
    EndTurn,
    MaxTokens,
    Other(String),
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Generated text plus metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Generation stopped at the token cap, so the text is cut short
    pub fn is_truncated(&self) -> bool {
        self.stop_reason == StopReason::MaxTokens
    }

    /// Plain text response, as a provider or mock would report it
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }
}
