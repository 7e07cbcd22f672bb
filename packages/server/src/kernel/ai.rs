// AI implementation using an OpenAI-compatible chat-completions provider
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in domain layers.

use anyhow::Result;
use async_trait::async_trait;
use completion_client::{ChatRequest, CompletionClient};
use std::time::Duration;

use super::BaseAI;

/// `BaseAI` backed by [`CompletionClient`] (Mistral by default).
#[derive(Clone)]
pub struct CompletionAI {
    client: CompletionClient,
    model: String,
}

impl CompletionAI {
    pub fn new(client: CompletionClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Client for `base_url` with every call bounded by `timeout`.
    pub fn connect(
        api_key: impl Into<String>,
        base_url: &str,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = CompletionClient::new(api_key)
            .with_base_url(base_url)
            .with_timeout(timeout);
        Self::new(client, model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl BaseAI for CompletionAI {
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema_name: &str,
        schema: serde_json::Value,
    ) -> Result<String> {
        tracing::debug!(
            model = %self.model,
            schema = schema_name,
            prompt_length = user_prompt.len(),
            "calling completion provider"
        );

        let request = ChatRequest::structured(
            &self.model,
            system_prompt,
            user_prompt,
            schema_name,
            schema,
        );

        let response = self.client.structured_output(request).await?;

        tracing::debug!(
            model = %self.model,
            response_length = response.len(),
            "completion provider responded"
        );

        Ok(response)
    }
}
