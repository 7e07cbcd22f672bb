//! One completion call per invocation, shape-checked before it is returned.

use completion_client::{strip_code_blocks, StructuredOutput};
use extraction::{truncate_chars, SourceType};
use std::time::Instant;
use tracing::{debug, warn};

use crate::domains::insights::error::GenerationError;
use crate::domains::insights::models::{EmailDraft, InsightSet};
use crate::domains::insights::prompts::{
    email_user_prompt, insights_user_prompt, EMAIL_SYSTEM_PROMPT, INSIGHTS_SYSTEM_PROMPT,
};
use crate::kernel::BaseAI;

/// Characters of source text sent for insight generation.
pub const MAX_INSIGHT_INPUT_CHARS: usize = 15_000;

/// Characters of research sent when drafting an email.
pub const MAX_EMAIL_CONTEXT_CHARS: usize = 3_000;

/// Derive conversation starters, pain points, market gaps and a summary.
pub async fn generate_insights(
    ai: &dyn BaseAI,
    text: &str,
    source_type: SourceType,
) -> Result<InsightSet, GenerationError> {
    let content = truncate_chars(text, MAX_INSIGHT_INPUT_CHARS);
    let user_prompt = insights_user_prompt(source_type, content);

    let insights: InsightSet = request(ai, INSIGHTS_SYSTEM_PROMPT, &user_prompt).await?;
    insights.check_shape().inspect_err(|e| {
        warn!(error = %e, "insight set failed shape check");
    })?;
    Ok(insights)
}

/// Draft a short outreach email around the chosen conversation starter.
pub async fn draft_email(
    ai: &dyn BaseAI,
    research: &str,
    starter: &str,
) -> Result<EmailDraft, GenerationError> {
    let research = truncate_chars(research, MAX_EMAIL_CONTEXT_CHARS);
    let user_prompt = email_user_prompt(research, starter);

    let draft: EmailDraft = request(ai, EMAIL_SYSTEM_PROMPT, &user_prompt).await?;
    draft.check_shape()?;
    Ok(draft)
}

async fn request<T: StructuredOutput>(
    ai: &dyn BaseAI,
    system_prompt: &str,
    user_prompt: &str,
) -> Result<T, GenerationError> {
    let schema_name = <T as StructuredOutput>::schema_name();
    let start = Instant::now();

    let raw = ai
        .generate_structured(system_prompt, user_prompt, &schema_name, T::strict_schema())
        .await
        .map_err(|e| {
            let err = GenerationError::from_provider(e);
            warn!(schema = %schema_name, error = %err, "completion failed");
            err
        })?;

    debug!(
        schema = %schema_name,
        prompt_chars = user_prompt.chars().count(),
        duration_ms = start.elapsed().as_millis() as u64,
        "completion received"
    );

    serde_json::from_str(strip_code_blocks(&raw))
        .map_err(|e| GenerationError::MalformedOutput(format!("{}: {}", schema_name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockAI;
    use completion_client::CompletionError;

    fn insight_json(starters: usize) -> String {
        serde_json::json!({
            "conversation_starters": (1..=starters).map(|i| format!("starter {}", i)).collect::<Vec<_>>(),
            "pain_points": ["slow onboarding", "churn", "hiring"],
            "market_gaps": ["self-serve tier", "EU market", "integrations"],
            "summary": "Acme builds developer tools. They recently raised a seed round."
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_parses_valid_output() {
        let ai = MockAI::new().with_response(insight_json(5));
        let insights = generate_insights(&ai, "Acme page", SourceType::Website)
            .await
            .unwrap();

        assert_eq!(insights.conversation_starters.len(), 5);
        assert_eq!(insights.pain_points[0], "slow onboarding");

        let calls = ai.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].schema_name, "InsightSet");
        assert_eq!(calls[0].system_prompt, INSIGHTS_SYSTEM_PROMPT);
        assert!(calls[0].user_prompt.contains("website content"));
    }

    #[tokio::test]
    async fn test_generate_sends_bounded_input() {
        let ai = MockAI::new().with_response(insight_json(5));
        let text = "a".repeat(40_000);
        generate_insights(&ai, &text, SourceType::Pdf).await.unwrap();

        let prompt = &ai.calls()[0].user_prompt;
        assert!(prompt.contains(&"a".repeat(MAX_INSIGHT_INPUT_CHARS)));
        assert!(!prompt.contains(&"a".repeat(MAX_INSIGHT_INPUT_CHARS + 1)));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_malformed() {
        let ai = MockAI::new().with_response(insight_json(4));
        let err = generate_insights(&ai, "text", SourceType::Website)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedOutput(_)));
    }

    #[tokio::test]
    async fn test_non_json_is_malformed() {
        let ai = MockAI::new().with_response("Sure! Here are some ideas...");
        let err = generate_insights(&ai, "text", SourceType::Website)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedOutput(_)));
    }

    #[tokio::test]
    async fn test_fenced_json_accepted() {
        let ai = MockAI::new().with_response(format!("```json\n{}\n```", insight_json(5)));
        assert!(generate_insights(&ai, "text", SourceType::Github).await.is_ok());
    }

    #[tokio::test]
    async fn test_provider_errors_are_classified() {
        let ai = MockAI::new().with_error(CompletionError::Timeout(30));
        let err = generate_insights(&ai, "text", SourceType::Website)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Timeout(30)));

        let ai = MockAI::new().with_error(CompletionError::Api {
            status: 500,
            message: "upstream".into(),
        });
        let err = generate_insights(&ai, "text", SourceType::Website)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Provider(_)));
    }

    #[tokio::test]
    async fn test_draft_email() {
        let ai = MockAI::new().with_json_response(&EmailDraft {
            subject: "Loved your launch".into(),
            body: "Hi Dana, ...".into(),
        });
        let research = "r".repeat(10_000);
        let draft = draft_email(&ai, &research, "Your launch post was great")
            .await
            .unwrap();

        assert_eq!(draft.subject, "Loved your launch");
        let call = &ai.calls()[0];
        assert_eq!(call.schema_name, "EmailDraft");
        assert_eq!(call.system_prompt, EMAIL_SYSTEM_PROMPT);
        assert!(call.user_prompt.contains("\"Your launch post was great\""));
        assert!(!call.user_prompt.contains(&"r".repeat(MAX_EMAIL_CONTEXT_CHARS + 1)));
    }

    #[tokio::test]
    async fn test_draft_email_requires_both_fields() {
        let ai = MockAI::new()
            .with_response(serde_json::json!({"subject": "", "body": "Hi"}).to_string());
        let err = draft_email(&ai, "research", "starter").await.unwrap_err();
        assert!(matches!(err, GenerationError::MalformedOutput(_)));
    }
}
