pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlSheet;
pub use memory::MemorySheet;

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

/// Number of columns in every sheet row
pub const COLUMN_COUNT: usize = 6;

/// One feedback submission as written to the sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRow {
    pub timestamp: DateTime<Utc>,
    pub category: String,
    pub code: String,
    pub label: String,
    pub feedback: String,
    pub combination: String,
}

impl SubmissionRow {
    /// Cells in column order: timestamp, category, code, label, feedback, combination
    pub fn cells(&self) -> [String; COLUMN_COUNT] {
        [
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.category.clone(),
            self.code.clone(),
            self.label.clone(),
            self.feedback.clone(),
            self.combination.clone(),
        ]
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sheet I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode row: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("sheet lock poisoned")]
    Poisoned,
}

/// Append-only tabular store.
///
/// Handlers only ever append; nothing in the request path reads rows back.
pub trait SheetStore: Send + Sync {
    fn append_row(&self, row: &SubmissionRow) -> Result<(), StoreError>;

    /// Short human-readable description used in logs and `/health`
    fn describe(&self) -> String;
}
