use super::{SheetStore, StoreError, SubmissionRow, COLUMN_COUNT};
use std::sync::Mutex;

/// In-process sheet. Rows are lost when the process exits.
#[derive(Default)]
pub struct MemorySheet {
    rows: Mutex<Vec<[String; COLUMN_COUNT]>>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn rows(&self) -> Vec<[String; COLUMN_COUNT]> {
        self.rows
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }
}

impl SheetStore for MemorySheet {
    fn append_row(&self, row: &SubmissionRow) -> Result<(), StoreError> {
        self.rows
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .push(row.cells());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
