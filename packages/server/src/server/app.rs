//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{header::CONTENT_TYPE, request::Parts, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::kernel::ServerDeps;
use crate::server::routes::{
    analyze_pdf_handler, analyze_url_handler, generate_email_handler, health_handler,
    list_reports_handler, usage_handler,
};

/// Preview deployments are allowed regardless of configuration.
const VERCEL_PREVIEW_SUFFIX: &str = ".vercel.app";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// HTTP-level settings that are not collaborators.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

impl From<&Config> for AppSettings {
    fn from(config: &Config) -> Self {
        Self {
            allowed_origins: config.allowed_origins.clone(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

/// Whether a browser origin may call the API.
pub fn origin_allowed(origin: &str, allowed: &[String]) -> bool {
    let origin = origin.trim_end_matches('/');
    if allowed.iter().any(|o| o == origin) {
        return true;
    }

    match origin.strip_prefix("https://") {
        Some(host) => host
            .strip_suffix(VERCEL_PREVIEW_SUFFIX)
            .is_some_and(|sub| !sub.is_empty() && !sub.contains('/')),
        None => false,
    }
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, settings: &AppSettings) -> Router {
    let app_state = AppState {
        deps: Arc::new(deps),
    };

    let allowed = settings.allowed_origins.clone();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| origin_allowed(o, &allowed))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/analyze-url", post(analyze_url_handler))
        .route("/api/analyze-pdf", post(analyze_pdf_handler))
        .route("/api/generate-email", post(generate_email_handler))
        .route("/api/reports", get(list_reports_handler))
        .route("/api/usage", get(usage_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(DefaultBodyLimit::max(settings.max_upload_bytes))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
