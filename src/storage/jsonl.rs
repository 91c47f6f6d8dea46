use super::{SheetStore, StoreError, SubmissionRow};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};

/// File-backed sheet: one JSON array of six strings per line.
pub struct JsonlSheet {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlSheet {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty sheet file if needed
    pub fn initialize(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if !self.path.exists() {
            File::create(&self.path)?;
            info!(path = ?self.path, "Created sheet file");
        }

        Ok(())
    }

    /// Read every row back. Not used on the request path.
    #[cfg(test)]
    pub fn read_rows(&self) -> Result<Vec<[String; super::COLUMN_COUNT]>, StoreError> {
        use std::io::{BufRead, BufReader};

        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut rows = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(serde_json::from_str(&line)?);
        }

        Ok(rows)
    }
}

impl SheetStore for JsonlSheet {
    fn append_row(&self, row: &SubmissionRow) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(&row.cells())?;
        line.push('\n');

        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        // A torn tail (interrupted write, external edit) must not swallow this row
        let len = file.metadata()?.len();
        if len > 0 && !ends_with_newline(&mut file, len)? {
            warn!(path = ?self.path, "Sheet ends mid-line, starting a fresh line");
            line.insert(0, '\n');
        }

        if let Err(e) = file.write_all(line.as_bytes()).and_then(|_| file.flush()) {
            if let Err(truncate_err) = file.set_len(len) {
                warn!(error = %truncate_err, "Failed to discard partial row");
            }
            return Err(e.into());
        }

        Ok(())
    }

    fn describe(&self) -> String {
        format!("jsonl:{}", self.path().display())
    }
}

fn ends_with_newline(file: &mut File, len: u64) -> std::io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
