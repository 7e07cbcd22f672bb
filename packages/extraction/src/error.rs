//! Typed errors for the extraction library.
//!
//! Every failure an extractor can hit is folded into [`ExtractError`] at the
//! extractor boundary; nothing else escapes.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while extracting a source.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Input rejected before any I/O (bad URL, empty upload, wrong file type)
    #[error("{0}")]
    InvalidInput(String),

    /// URL fetch exceeded its deadline
    #[error("request timed out fetching {url}")]
    Timeout { url: String },

    /// Network or HTTP-status failure while fetching a URL
    #[error("failed to fetch {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Payload could not be parsed (unreadable PDF)
    #[error("failed to parse document: {0}")]
    ParseFailed(String),

    /// Anything else (worker panics, client construction)
    #[error("extraction failed: {0}")]
    Unknown(String),
}

/// Stable, machine-readable discriminant of an [`ExtractError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractErrorKind {
    InvalidInput,
    Timeout,
    FetchFailed,
    ParseFailed,
    Unknown,
}

impl ExtractErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::Timeout => "timeout",
            Self::FetchFailed => "fetch_failed",
            Self::ParseFailed => "parse_failed",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ExtractErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ExtractError {
    pub fn kind(&self) -> ExtractErrorKind {
        match self {
            Self::InvalidInput(_) => ExtractErrorKind::InvalidInput,
            Self::Timeout { .. } => ExtractErrorKind::Timeout,
            Self::FetchFailed { .. } => ExtractErrorKind::FetchFailed,
            Self::ParseFailed(_) => ExtractErrorKind::ParseFailed,
            Self::Unknown(_) => ExtractErrorKind::Unknown,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// HTTP status failure (the request itself succeeded).
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::FetchFailed {
            url: url.into(),
            source: format!("HTTP {}", status).into(),
        }
    }
}

/// Result type alias for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
