use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::domains::insights::GenerationError;
use crate::domains::research::PipelineError;

/// Error returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// Request body could not be read as the handler expected.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub reason: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_required: Option<bool>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Rejected { status, .. } => *status,
            Self::Pipeline(e) => match e.reason() {
                "invalid_input" | "parse_failed" => StatusCode::BAD_REQUEST,
                "quota_exceeded" => StatusCode::TOO_MANY_REQUESTS,
                "fetch_failed" => StatusCode::BAD_GATEWAY,
                "timeout" => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Generation(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::BadRequest(_) | Self::Rejected { .. } => "invalid_input",
            Self::Pipeline(e) => e.reason(),
            Self::Generation(_) => "generation_failed",
            Self::Internal(_) => "internal",
        }
    }

    fn body(&self) -> ErrorBody {
        let message = match self {
            Self::Internal(_) | Self::Pipeline(PipelineError::Persistence(_)) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let upgrade_required = match self {
            Self::Pipeline(e) if e.upgrade_required() => Some(true),
            _ => None,
        };

        ErrorBody {
            success: false,
            error: message,
            reason: self.reason(),
            upgrade_required,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), reason = self.reason(), error = %self, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Rejected {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extraction::ExtractError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (PipelineError::InvalidInput("URL is required".into()), 400),
            (PipelineError::QuotaExceeded, 429),
            (PipelineError::from(ExtractError::ParseFailed("bad".into())), 400),
            (PipelineError::from(ExtractError::http_status("u", 503)), 502),
            (PipelineError::from(ExtractError::Timeout { url: "u".into() }), 504),
            (PipelineError::from(ExtractError::Unknown("?".into())), 500),
            (PipelineError::from(GenerationError::Timeout(30)), 500),
            (PipelineError::Persistence(anyhow::anyhow!("db")), 500),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status().as_u16(), expected);
        }
    }

    #[test]
    fn test_quota_body_requests_upgrade() {
        let body = ApiError::from(PipelineError::QuotaExceeded).body();
        assert!(!body.success);
        assert_eq!(body.reason, "quota_exceeded");
        assert_eq!(body.upgrade_required, Some(true));
        assert_eq!(body.error, "Usage limit reached. Please upgrade your plan.");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let body = ApiError::from(PipelineError::Persistence(anyhow::anyhow!(
            "password authentication failed"
        )))
        .body();
        assert_eq!(body.error, "Internal server error");
        assert_eq!(body.upgrade_required, None);

        let body = ApiError::Internal(anyhow::anyhow!("pool closed")).body();
        assert_eq!(body.error, "Internal server error");
    }

    #[test]
    fn test_bad_request_keeps_message() {
        let body = ApiError::BadRequest("No file provided".into()).body();
        assert_eq!(body.error, "No file provided");
        assert_eq!(body.reason, "invalid_input");
    }
}
