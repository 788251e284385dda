//! Export prediction rows to a timestamped CSV.
//!
//! Files are named `preds_YYYYMMDDHHMM.csv`, so two runs in the same minute
//! write to the same file and the later one wins.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::domain::PredictionRow;
use crate::error::AppError;

pub const PREDICTIONS_HEADER: [&str; 3] = ["id", "price", "predicted_price_category"];

/// File name for predictions written at `timestamp` (minute granularity).
pub fn prediction_filename(timestamp: NaiveDateTime) -> String {
    format!("preds_{}.csv", timestamp.format("%Y%m%d%H%M"))
}

/// Write `rows` under `dir` (created if needed) and return the file path.
pub fn write_predictions_csv(
    dir: &Path,
    rows: &[PredictionRow],
    timestamp: NaiveDateTime,
) -> Result<PathBuf, AppError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        AppError::io(format!("Failed to create predictions directory '{}'", dir.display()), e)
    })?;

    let path = dir.join(prediction_filename(timestamp));
    let mut writer = csv::Writer::from_path(&path).map_err(|e| csv_error(&path, e))?;

    writer
        .write_record(PREDICTIONS_HEADER)
        .map_err(|e| csv_error(&path, e))?;
    for row in rows {
        writer
            .write_record([
                cell_text(&row.id),
                cell_text(&row.price),
                row.predicted_price_category.clone(),
            ])
            .map_err(|e| csv_error(&path, e))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush '{}'", path.display()), e))?;

    Ok(path)
}

/// CSV text for a JSON cell: strings unquoted, null empty, everything else as JSON.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn csv_error(path: &Path, err: csv::Error) -> AppError {
    let context = format!("Failed to write predictions CSV '{}'", path.display());
    match err.into_kind() {
        csv::ErrorKind::Io(source) => AppError::io(context, source),
        other => AppError::io(context, std::io::Error::other(format!("{other:?}"))),
    }
}
