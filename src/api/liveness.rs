use crate::api::models::{AppState, HealthResponse};
use axum::{extract::State, routing::get, Json, Router};

pub const LIVENESS_MESSAGE: &str = "SlotLove API is running!";

/// Plain-text liveness check. Ignores the request entirely.
pub async fn liveness_handler() -> &'static str {
    LIVENESS_MESSAGE
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.sheet.describe(),
    })
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness_handler))
        .route("/health", get(health_handler))
}
