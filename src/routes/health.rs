use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

pub const LIVENESS_TEXT: &str = "Focus Studio server!!!";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthData {
    pub status: String,
    pub database: String,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Liveness text", body = String, content_type = "text/plain")),
    tag = "Health"
)]
pub async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthData),
        (status = 503, description = "Database unreachable", body = HealthData),
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthData>) {
    let (status, database) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "up"),
        Err(err) => {
            tracing::warn!(error = %err, "health check ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, "down")
        }
    };
    let data = HealthData {
        status: if status.is_success() { "ok" } else { "degraded" }.to_string(),
        database: database.to_string(),
    };
    (status, Json(data))
}
