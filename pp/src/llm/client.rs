//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless text generation client
///
/// Every call is independent; the itinerary prompt carries all the context
/// the generator needs.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single generation request and wait for the full response
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Provider and model, for logs and the TUI header
    fn describe(&self) -> String;
}
