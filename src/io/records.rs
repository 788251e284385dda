//! Test-record ingest.
//!
//! Each matching file holds exactly one JSON object. Any unreadable or
//! malformed file aborts the whole read; there is no partial success.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::domain::Record;
use crate::error::AppError;
use crate::io::locate::list_matching;

/// Read every file in `dir` matching `pattern` as one record.
///
/// Records come back in directory enumeration order, which is platform
/// dependent and deliberately left unsorted.
pub fn read_records(dir: &Path, pattern: &str) -> Result<Vec<Record>, AppError> {
    let files = list_matching(dir, pattern)?;
    if files.is_empty() {
        return Err(AppError::NotFound {
            what: "test files",
            dir: dir.to_path_buf(),
        });
    }

    files.iter().map(|path| read_record(path)).collect()
}

/// Parse a single JSON object from `path`.
pub fn read_record(path: &Path) -> Result<Record, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open test file '{}'", path.display()), e))?;
    let record: Record =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| AppError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), fields = record.len(), "Read test record");
    Ok(record)
}
