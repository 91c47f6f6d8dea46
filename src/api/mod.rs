pub mod liveness;
pub mod models;
pub mod submission;

// Re-exports
pub use models::*;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the HTTP surface: `GET /` liveness, `POST /` submission, `GET /health`.
pub fn router(state: AppState, max_body_bytes: usize, cors: bool) -> Router {
    let app = Router::new()
        .merge(liveness::routes())
        .merge(submission::routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http());

    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
