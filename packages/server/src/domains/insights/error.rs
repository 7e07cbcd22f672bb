use completion_client::CompletionError;
use thiserror::Error;

/// Why a completion did not produce a usable result.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The model answered, but not with the contracted shape.
    #[error("model returned malformed output: {0}")]
    MalformedOutput(String),

    #[error("completion provider failed: {0}")]
    Provider(String),

    #[error("completion timed out after {0}s")]
    Timeout(u64),
}

impl GenerationError {
    /// Classify a failure surfaced by a `BaseAI` call.
    pub fn from_provider(err: anyhow::Error) -> Self {
        match err.downcast_ref::<CompletionError>() {
            Some(CompletionError::Timeout(secs)) => Self::Timeout(*secs),
            Some(CompletionError::Parse(message)) => Self::MalformedOutput(message.clone()),
            _ => Self::Provider(format!("{:#}", err)),
        }
    }
}
