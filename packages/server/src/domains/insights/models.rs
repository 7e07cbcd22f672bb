use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::error::GenerationError;

pub const CONVERSATION_STARTER_COUNT: usize = 5;
pub const PAIN_POINT_COUNT: usize = 3;
pub const MARKET_GAP_COUNT: usize = 3;

/// Sales-outreach insights derived from one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InsightSet {
    /// Opening lines that reference specific details from the content
    #[schemars(length(equal = 5))]
    pub conversation_starters: Vec<String>,
    /// Challenges this person or company is likely facing
    #[schemars(length(equal = 3))]
    pub pain_points: Vec<String>,
    /// Untapped opportunities or areas they could improve
    #[schemars(length(equal = 3))]
    pub market_gaps: Vec<String>,
    /// Two-sentence summary of who this person or company is
    pub summary: String,
}

impl InsightSet {
    /// Reject anything but exactly 5/3/3 non-blank items and a summary.
    pub fn check_shape(&self) -> Result<(), GenerationError> {
        check_list("conversation_starters", &self.conversation_starters, CONVERSATION_STARTER_COUNT)?;
        check_list("pain_points", &self.pain_points, PAIN_POINT_COUNT)?;
        check_list("market_gaps", &self.market_gaps, MARKET_GAP_COUNT)?;
        if self.summary.trim().is_empty() {
            return Err(GenerationError::MalformedOutput("summary is empty".into()));
        }
        Ok(())
    }
}

fn check_list(field: &str, items: &[String], expected: usize) -> Result<(), GenerationError> {
    if items.len() != expected {
        return Err(GenerationError::MalformedOutput(format!(
            "expected {} {}, got {}",
            expected,
            field,
            items.len()
        )));
    }
    if items.iter().any(|item| item.trim().is_empty()) {
        return Err(GenerationError::MalformedOutput(format!(
            "{} contains an empty entry",
            field
        )));
    }
    Ok(())
}

/// Outreach email built around one conversation starter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmailDraft {
    /// Email subject line
    pub subject: String,
    /// Email body, at most about 150 words
    pub body: String,
}

impl EmailDraft {
    pub fn check_shape(&self) -> Result<(), GenerationError> {
        if self.subject.trim().is_empty() || self.body.trim().is_empty() {
            return Err(GenerationError::MalformedOutput(
                "email subject and body must both be present".into(),
            ));
        }
        Ok(())
    }
}
