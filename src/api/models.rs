use crate::storage::{SheetStore, StoreError, SubmissionRow};
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub sheet: Arc<dyn SheetStore>,
}

impl AppState {
    pub fn new(sheet: Arc<dyn SheetStore>) -> Self {
        Self { sheet }
    }
}

/// Decoded body of a feedback submission. Absent or null fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub category: String,
    pub code: String,
    pub label: String,
    pub feedback: String,
    pub combination: String,
}

impl SubmissionPayload {
    /// Decode a raw request body.
    ///
    /// The body must be a JSON object. Each known field may be missing, `null`
    /// or a string; any other JSON type is rejected. Unknown keys are ignored.
    pub fn decode(body: &[u8]) -> Result<Self, SubmissionError> {
        let value: Value = serde_json::from_slice(body)?;
        let fields = match value {
            Value::Object(fields) => fields,
            other => return Err(SubmissionError::NotAnObject(json_kind(&other))),
        };

        Ok(Self {
            category: string_field(&fields, "category")?,
            code: string_field(&fields, "code")?,
            label: string_field(&fields, "label")?,
            feedback: string_field(&fields, "feedback")?,
            combination: string_field(&fields, "combination")?,
        })
    }

    pub fn into_row(self, timestamp: DateTime<Utc>) -> SubmissionRow {
        SubmissionRow {
            timestamp,
            category: self.category,
            code: self.code,
            label: self.label,
            feedback: self.feedback,
            combination: self.combination,
        }
    }
}

fn string_field(
    fields: &Map<String, Value>,
    name: &'static str,
) -> Result<String, SubmissionError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(SubmissionError::FieldType {
            field: name,
            found: json_kind(other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Acknowledgment returned for every submission
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
}

/// Everything that can go wrong while recording a submission
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    #[error("invalid JSON body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("field `{field}` must be a string, got {found}")]
    FieldType {
        field: &'static str,
        found: &'static str,
    },

    #[error("failed to append row: {0}")]
    Store(#[from] StoreError),

    #[error("append task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for SubmissionError {
    /// Failures keep the default status; the body's `success` flag carries the outcome.
    fn into_response(self) -> Response {
        match &self {
            SubmissionError::Store(e) => error!("Failed to append submission: {}", e),
            SubmissionError::Task(e) => error!("Append task failed: {}", e),
            other => warn!(error = %other, "Rejected submission"),
        }

        (StatusCode::OK, Json(SubmissionResponse::failure(self.to_string()))).into_response()
    }
}
