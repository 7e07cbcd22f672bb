//! Health check and cross-origin behaviour of the HTTP surface.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use tower::ServiceExt;

use crate::common::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "Lead Research SaaS API");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

async fn preflight(app: &TestApp, origin: &str) -> Option<String> {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/analyze-url")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_cors_allows_configured_and_preview_origins() {
    let app = TestApp::new();

    assert_eq!(
        preflight(&app, "http://localhost:3000").await.as_deref(),
        Some("http://localhost:3000")
    );
    assert_eq!(
        preflight(&app, "https://lead-app-git-main.vercel.app").await.as_deref(),
        Some("https://lead-app-git-main.vercel.app")
    );
}

#[tokio::test]
async fn test_cors_rejects_unknown_origin() {
    let app = TestApp::new();

    assert_eq!(preflight(&app, "https://evil.example.com").await, None);
}
