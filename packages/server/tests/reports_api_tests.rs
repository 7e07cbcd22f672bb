//! HTTP tests for /api/reports and /api/usage.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use extraction::SourceType;
use serde_json::json;
use server_core::domains::insights::InsightSet;
use server_core::domains::reports::Report;
use server_core::domains::usage::{Tier, UsageRecord};
use server_core::kernel::test_dependencies::MockAI;
use server_core::kernel::BaseReportStore;

use crate::common::TestApp;

fn insights() -> InsightSet {
    serde_json::from_str(&MockAI::default_response("InsightSet")).unwrap()
}

/// Store `count` reports for `session_id`, one minute apart, oldest first.
async fn seed_reports(app: &TestApp, session_id: &str, count: usize) {
    let start = Utc::now() - Duration::hours(1);
    for i in 0..count {
        let mut report = Report::new(
            session_id,
            &format!("https://site-{}.test", i),
            SourceType::Website,
            "content",
            &insights(),
        );
        report.created_at = start + Duration::minutes(i as i64);
        app.deps.store.insert_report(&report).await.unwrap();
    }
}

fn urls(body: &serde_json::Value) -> Vec<String> {
    body["reports"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["source_url"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// reports
// =============================================================================

#[tokio::test]
async fn test_reports_newest_first() {
    let app = TestApp::new();
    seed_reports(&app, "s1", 3).await;
    seed_reports(&app, "other", 2).await;

    let (status, body) = app.get("/api/reports?session_id=s1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        urls(&body),
        vec![
            "https://site-2.test",
            "https://site-1.test",
            "https://site-0.test"
        ]
    );
}

#[tokio::test]
async fn test_reports_limit_defaults_and_clamps() {
    let app = TestApp::new();
    seed_reports(&app, "s1", 12).await;

    let (_, body) = app.get("/api/reports?session_id=s1").await;
    assert_eq!(urls(&body).len(), 10);

    let (_, body) = app.get("/api/reports?session_id=s1&limit=3").await;
    assert_eq!(urls(&body).len(), 3);

    let (_, body) = app.get("/api/reports?session_id=s1&limit=0").await;
    assert_eq!(urls(&body), vec!["https://site-11.test"]);

    let (_, body) = app.get("/api/reports?session_id=s1&limit=1000").await;
    assert_eq!(urls(&body).len(), 12);
}

#[tokio::test]
async fn test_reports_default_to_anonymous_session() {
    let app = TestApp::new();
    seed_reports(&app, "anonymous", 1).await;
    seed_reports(&app, "s1", 2).await;

    let (_, body) = app.get("/api/reports").await;

    assert_eq!(urls(&body), vec!["https://site-0.test"]);
}

#[tokio::test]
async fn test_report_shape() {
    let app = TestApp::new();
    app.post_json(
        "/api/analyze-url",
        json!({ "url": "https://github.com/acme", "session_id": "s1" }),
    )
    .await;

    let (_, body) = app.get("/api/reports?session_id=s1").await;
    let report = &body["reports"][0];

    assert_eq!(report["source_url"], "https://github.com/acme");
    assert_eq!(report["source_type"], "github");
    assert_eq!(report["session_id"], "s1");
    assert_eq!(report["conversation_starters"].as_array().unwrap().len(), 5);
    assert!(report["id"].is_string());
    assert!(report["created_at"].is_string());
}

#[tokio::test]
async fn test_unparseable_limit_uses_default() {
    let app = TestApp::new();
    seed_reports(&app, "s1", 12).await;

    let (status, body) = app.get("/api/reports?session_id=s1&limit=lots").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(urls(&body).len(), 10);

    let (status, body) = app.get("/api/reports?session_id=s1&limit=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(urls(&body).len(), 10);
}

// =============================================================================
// usage
// =============================================================================

fn reset_date(body: &serde_json::Value) -> DateTime<Utc> {
    body["usage"]["reset_date"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap()
}

#[tokio::test]
async fn test_usage_for_new_session() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/usage?session_id=fresh").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["usage"]["reports_generated"], 0);
    assert_eq!(body["usage"]["limit"], 5);
    assert_eq!(body["usage"]["tier"], "free");

    let days = (reset_date(&body) - Utc::now()).num_days();
    assert!((29..=30).contains(&days));
}

#[tokio::test]
async fn test_usage_counts_reports() {
    let app = TestApp::new();
    for _ in 0..2 {
        app.post_json(
            "/api/analyze-url",
            json!({ "url": "https://acme.test", "session_id": "s1" }),
        )
        .await;
    }

    let (_, body) = app.get("/api/usage?session_id=s1").await;

    assert_eq!(body["usage"]["reports_generated"], 2);
}

#[tokio::test]
async fn test_usage_limit_per_tier() {
    let app = TestApp::new();
    app.deps.store.set_tier("pro-user", Tier::Pro, Utc::now());
    app.deps.store.set_tier("biz-user", Tier::Business, Utc::now());

    let (_, body) = app.get("/api/usage?session_id=pro-user").await;
    assert_eq!(body["usage"]["tier"], "pro");
    assert_eq!(body["usage"]["limit"], 50);

    let (_, body) = app.get("/api/usage?session_id=biz-user").await;
    assert_eq!(body["usage"]["tier"], "business");
    assert!(body["usage"]["limit"].is_null());
}

#[tokio::test]
async fn test_usage_applies_due_reset() {
    let app = TestApp::new();
    let now = Utc::now();
    app.deps.store.put_usage(UsageRecord {
        session_id: "s1".into(),
        reports_generated: 5,
        tier: Tier::Free,
        reset_at: now - Duration::days(1),
    });

    let (_, body) = app.get("/api/usage?session_id=s1").await;

    assert_eq!(body["usage"]["reports_generated"], 0);
    assert!(reset_date(&body) > now + Duration::days(29));

    let (status, _) = app
        .post_json(
            "/api/analyze-url",
            json!({ "url": "https://acme.test", "session_id": "s1" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}
