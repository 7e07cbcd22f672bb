use axum::{extract::rejection::JsonRejection, extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::domains::insights::{draft_email, EmailDraft};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct GenerateEmailRequest {
    pub content: Option<String>,
    pub conversation_starter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateEmailResponse {
    pub success: bool,
    pub data: EmailDraft,
}

/// POST /api/generate-email
///
/// Not metered: drafting an email does not count against the usage quota.
pub async fn generate_email_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<GenerateEmailRequest>, JsonRejection>,
) -> Result<Json<GenerateEmailResponse>, ApiError> {
    let Json(request) = payload?;
    let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

    let (Some(content), Some(starter)) = (
        present(request.content),
        present(request.conversation_starter),
    ) else {
        return Err(ApiError::BadRequest(
            "Content and conversation_starter are required".into(),
        ));
    };

    let draft = draft_email(state.deps.ai.as_ref(), &content, &starter).await?;

    Ok(Json(GenerateEmailResponse {
        success: true,
        data: draft,
    }))
}
