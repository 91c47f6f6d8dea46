use crate::api::models::AppState;
use crate::api::submission::handlers::submit_handler;
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_handler))
}
