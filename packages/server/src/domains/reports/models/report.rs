use chrono::{DateTime, Utc};
use extraction::{truncate_chars, SourceType};
use serde::{Deserialize, Serialize};

use crate::common::ReportId;
use crate::domains::insights::InsightSet;

/// Characters of source text kept on a stored report.
pub const MAX_STORED_CONTENT_CHARS: usize = 5_000;

/// Outcome of one successful analysis. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    /// URL for web sources, original filename for uploads.
    pub source_url: String,
    pub source_type: SourceType,
    pub source_content: String,
    pub conversation_starters: Vec<String>,
    pub pain_points: Vec<String>,
    pub market_gaps: Vec<String>,
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

impl Report {
    pub fn new(
        session_id: impl Into<String>,
        source_url: impl Into<String>,
        source_type: SourceType,
        source_content: &str,
        insights: &InsightSet,
    ) -> Self {
        Self {
            id: ReportId::new(),
            source_url: source_url.into(),
            source_type,
            source_content: truncate_chars(source_content, MAX_STORED_CONTENT_CHARS).to_string(),
            conversation_starters: insights.conversation_starters.clone(),
            pain_points: insights.pain_points.clone(),
            market_gaps: insights.market_gaps.clone(),
            session_id: session_id.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insights() -> InsightSet {
        InsightSet {
            conversation_starters: (1..=5).map(|i| format!("starter {}", i)).collect(),
            pain_points: (1..=3).map(|i| format!("pain {}", i)).collect(),
            market_gaps: (1..=3).map(|i| format!("gap {}", i)).collect(),
            summary: "Acme builds rockets. They are hiring.".into(),
        }
    }

    #[test]
    fn test_source_content_is_truncated() {
        let content = "é".repeat(7_000);
        let report = Report::new("s1", "https://acme.test", SourceType::Website, &content, &insights());
        assert_eq!(report.source_content.chars().count(), 5_000);
    }

    #[test]
    fn test_serialized_shape() {
        let report = Report::new("s1", "deck.pdf", SourceType::Pdf, "body", &insights());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["source_url"], "deck.pdf");
        assert_eq!(json["source_type"], "pdf");
        assert_eq!(json["session_id"], "s1");
        assert_eq!(json["conversation_starters"].as_array().unwrap().len(), 5);
        assert_eq!(json["id"], report.id.to_string());
        assert!(json["created_at"].as_str().unwrap().contains('T'));
    }
}
