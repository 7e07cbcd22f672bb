// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use completion_client::CompletionError;
use extraction::MockExtractor;
use std::sync::{Arc, Mutex};

use super::stores::MemoryStore;
use super::{BaseAI, ServerDeps};

// =============================================================================
// Mock AI (structured completions)
// =============================================================================

/// Arguments captured from a `generate_structured` call
#[derive(Debug, Clone)]
pub struct AICall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub schema_name: String,
}

enum MockReply {
    Text(String),
    Failure(anyhow::Error),
}

/// Queued replies are returned in order. Once the queue is empty, a valid
/// answer for the requested schema is returned.
pub struct MockAI {
    responses: Arc<Mutex<Vec<MockReply>>>,
    calls: Arc<Mutex<Vec<AICall>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a raw text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockReply::Text(response.into()));
        self
    }

    /// Add a JSON response to the queue (will be serialized)
    pub fn with_json_response<T: serde::Serialize>(self, data: &T) -> Self {
        let json = serde_json::to_string(data).expect("Failed to serialize mock response");
        self.with_response(json)
    }

    /// Queue a completion-client failure
    pub fn with_error(self, error: CompletionError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockReply::Failure(error.into()));
        self
    }

    /// Get all calls made to the AI
    pub fn calls(&self) -> Vec<AICall> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if a user prompt containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.user_prompt.contains(text))
    }

    /// Get the number of times the AI was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// A well-formed answer for the schemas this service asks for.
    pub fn default_response(schema_name: &str) -> String {
        match schema_name {
            "InsightSet" => serde_json::json!({
                "conversation_starters": [
                    "I saw your team just shipped a new onboarding flow.",
                    "Your post about remote hiring stood out.",
                    "Congrats on the recent funding round.",
                    "Your customer stories page is unusually candid.",
                    "I noticed you are expanding into Europe."
                ],
                "pain_points": [
                    "Scaling support without growing headcount",
                    "Long sales cycles with enterprise buyers",
                    "Hiring senior engineers"
                ],
                "market_gaps": [
                    "Self-serve tier for small teams",
                    "Native integrations with CRMs",
                    "Localized onboarding"
                ],
                "summary": "Mock Company builds workflow software for growing teams. They are expanding quickly."
            })
            .to_string(),
            "EmailDraft" => serde_json::json!({
                "subject": "Quick thought on your onboarding launch",
                "body": "Hi there,\n\nI saw your team just shipped a new onboarding flow. Would you be open to a short chat next week?\n\nBest,\nAlex"
            })
            .to_string(),
            _ => "{}".to_string(),
        }
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn generate_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema_name: &str,
        _schema: serde_json::Value,
    ) -> Result<String> {
        // Record the call
        self.calls.lock().unwrap().push(AICall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            schema_name: schema_name.to_string(),
        });

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(Self::default_response(schema_name));
        }
        match responses.remove(0) {
            MockReply::Text(text) => Ok(text),
            MockReply::Failure(err) => Err(err),
        }
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub ai: Arc<MockAI>,
    pub extractor: Arc<MockExtractor>,
    pub store: Arc<MemoryStore>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            ai: Arc::new(MockAI::new()),
            extractor: Arc::new(MockExtractor::new()),
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Set a mock AI
    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Arc::new(ai);
        self
    }

    /// Set a mock extractor
    pub fn mock_extractor(mut self, extractor: MockExtractor) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// ServerDeps wired to these mocks. The mocks stay inspectable through `self`.
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.ai.clone(),
            self.extractor.clone(),
            self.store.clone(),
            self.store.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
