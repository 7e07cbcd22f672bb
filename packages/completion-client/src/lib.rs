//! Chat-completions client for OpenAI-compatible providers
//!
//! A minimal client for the `chat/completions` endpoint. Defaults target the
//! Mistral platform, but any provider speaking the same wire format works via
//! [`CompletionClient::with_base_url`].
//!
//! # Example
//!
//! ```rust,ignore
//! use completion_client::{CompletionClient, ChatRequest, Message};
//!
//! let client = CompletionClient::from_env()?;
//!
//! let response = client
//!     .chat_completion(ChatRequest::new("mistral-small-latest").message(Message::user("Hello!")))
//!     .await?;
//! ```
//!
//! # Type-Safe Structured Output
//!
//! ```rust,ignore
//! #[derive(Deserialize, JsonSchema)]
//! struct Summary {
//!     headline: String,
//! }
//!
//! let summary: Summary = client
//!     .extract::<Summary>("mistral-small-latest", system_prompt, user_prompt)
//!     .await?;
//! ```

pub mod error;
pub mod schema;
pub mod types;

pub use error::{CompletionError, Result};
pub use schema::StructuredOutput;
pub use types::*;

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, warn};

/// Default provider endpoint.
pub const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

/// Cost-effective default model.
pub const MISTRAL_SMALL: &str = "mistral-small-latest";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Chat-completions API client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct CompletionClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl CompletionClient {
    /// Create a client for the default provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: MISTRAL_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from environment variable `MISTRAL_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("MISTRAL_API_KEY")
            .map_err(|_| CompletionError::Config("MISTRAL_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (proxies, other OpenAI-compatible providers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Type-safe structured output extraction.
    ///
    /// Generates a strict JSON schema from `T`, sends it as the response
    /// format, and deserializes the answer.
    pub async fn extract<T: StructuredOutput>(
        &self,
        model: &str,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Result<T> {
        let request = ChatRequest::structured(
            model,
            system_prompt,
            user_prompt,
            <T as StructuredOutput>::schema_name(),
            T::strict_schema(),
        );
        let json_str = self.structured_output(request).await?;

        serde_json::from_str(strip_code_blocks(&json_str))
            .map_err(|e| CompletionError::Parse(format!("Failed to deserialize response: {}", e)))
    }

    /// Chat completion.
    pub async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = Instant::now();
        let raw = self.post_chat(&request).await?;

        let usage = raw.usage;
        let content = first_content(raw.choices)?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "chat completion"
        );

        Ok(ChatResponse { content, usage })
    }

    /// Completion constrained by the request's `response_format`.
    ///
    /// Returns the raw JSON text; callers deserialize.
    pub async fn structured_output(&self, request: ChatRequest) -> Result<String> {
        if request.response_format.is_none() {
            return Err(CompletionError::Config(
                "structured output requires a response_format".into(),
            ));
        }
        let raw = self.post_chat(&request).await?;
        first_content(raw.choices)
    }

    async fn post_chat(&self, request: &ChatRequest) -> Result<ChatResponseRaw> {
        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "completion API error");
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                CompletionError::Parse(e.to_string())
            }
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            warn!(timeout_secs = self.timeout.as_secs(), "completion request timed out");
            CompletionError::Timeout(self.timeout.as_secs())
        } else {
            warn!(error = %e, "completion request failed");
            CompletionError::Network(e.to_string())
        }
    }
}

fn first_content(choices: Vec<types::ChatChoice>) -> Result<String> {
    choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| CompletionError::Parse("No content in completion response".into()))
}
