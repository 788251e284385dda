//! The prediction pipeline shared by the binary and library callers.
//!
//! locate model -> load model -> read records -> assemble table -> predict -> export
//!
//! Failures are returned, never logged here; the caller decides whether to
//! report and exit or to propagate.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::data::Table;
use crate::domain::{PredictionRow, RunConfig};
use crate::error::AppError;
use crate::io::{locate_latest, read_records, write_predictions_csv};
use crate::models::load_model;
use crate::report::{build_prediction_rows, format_category_summary};

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub model_path: PathBuf,
    pub classifier_name: String,
    pub n_samples: usize,
    pub rows: Vec<PredictionRow>,
    pub output_path: PathBuf,
}

/// Run the full pipeline; `now` stamps the output file name.
pub fn run_predict(config: &RunConfig, now: NaiveDateTime) -> Result<RunOutput, AppError> {
    // 1) Newest model artifact.
    let model_path = locate_latest(&config.models_dir(), &config.model_pattern, "trained models")?;
    debug!(path = %model_path.display(), "Using model artifact");
    let model = load_model(&model_path)?;
    info!("Loaded model: {}", model.classifier_name);

    // 2) Test records -> table.
    let records = read_records(&config.test_dir(), &config.test_pattern)?;
    let table = Table::from_records(records);
    info!("Loaded {} test samples", table.n_rows());

    // 3) Predict and pair labels with id/price.
    let labels = model.predictor.predict(&table)?;
    let rows = build_prediction_rows(&table, labels)?;
    for line in format_category_summary(&rows).lines() {
        info!("  {line}");
    }

    // 4) Export.
    let output_path = write_predictions_csv(&config.predictions_dir(), &rows, now)?;
    info!("Predictions saved to {}", output_path.display());

    Ok(RunOutput {
        model_path,
        classifier_name: model.classifier_name,
        n_samples: table.n_rows(),
        rows,
        output_path,
    })
}
