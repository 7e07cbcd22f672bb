use axum::Json;
use serde::Serialize;

pub const SERVICE_NAME: &str = "Lead Research SaaS API";

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

/// Liveness probe. Does not touch the store or the completion provider.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}
