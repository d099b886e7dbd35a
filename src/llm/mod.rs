//! Generation collaborator contract.
//!
//! The core only ever supplies a plain text prompt and expects a plain text
//! completion; no model identity or message structure leaks past this seam.

mod openai_compatible;

pub use openai_compatible::OpenAiCompatibleProvider;

use async_trait::async_trait;

use crate::error::LlmError;

/// Trait for generation providers.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logs and error context.
    fn name(&self) -> &str;

    /// Complete a plain text prompt into plain text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Complete and reject empty output. An empty completion counts as a
    /// generation failure: the pipeline must never fabricate advice text in
    /// its place.
    async fn complete_checked(&self, prompt: &str) -> Result<String, LlmError> {
        let text = self.complete(prompt).await?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(LlmError::EmptyResponse {
                provider: self.name().to_string(),
            });
        }
        Ok(trimmed.to_string())
    }
}
