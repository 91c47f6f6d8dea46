use crate::api::models::*;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use chrono::Utc;
use tracing::info;

/// Record one feedback submission as a new sheet row
pub async fn submit_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SubmissionResponse>, SubmissionError> {
    let body = body?;
    let payload = SubmissionPayload::decode(&body)?;

    info!(
        category = %payload.category,
        code = %payload.code,
        feedback = %payload.feedback,
        "Recording submission"
    );

    let timestamp = Utc::now();
    let row = payload.into_row(timestamp);

    // File append blocks; keep it off the async workers
    let sheet = state.sheet.clone();
    tokio::task::spawn_blocking(move || sheet.append_row(&row)).await??;

    info!(timestamp = %timestamp, "Submission recorded");

    Ok(Json(SubmissionResponse::ok()))
}
