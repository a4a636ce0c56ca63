#[cfg(test)]
#[path = "completions_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::BackendBox;
use crate::domain::models::BackendPrompt;
use crate::domain::models::CompletionError;
use crate::domain::models::TurnContent;
use crate::domain::models::Variant;

/// Sends one user turn to the backend, wrapped in the preamble of the chosen
/// variant, and classifies the reply.
pub struct CompletionClient {
    backend: BackendBox,
}

impl CompletionClient {
    pub fn new(backend: BackendBox) -> CompletionClient {
        return CompletionClient { backend };
    }

    pub async fn health_check(&self) -> Result<()> {
        return self.backend.health_check().await;
    }

    pub async fn complete(
        &self,
        user_text: &str,
        variant: Variant,
    ) -> Result<TurnContent, CompletionError> {
        let prompt = BackendPrompt::new(variant.prompt(user_text));
        tracing::debug!(variant = %variant, "Requesting completion");

        let completion = self.backend.get_completion(prompt).await?;
        tracing::debug!(variant = %variant, completion = %completion, "Completion received");

        return variant.classify(&completion);
    }
}
