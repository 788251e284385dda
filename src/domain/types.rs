//! Shared domain types.
//!
//! These types are intentionally kept small: a run is fully described by a
//! `RunConfig`, and everything else is re-derived from disk on each invocation.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};

/// Default glob for model artifacts produced by the training pipeline.
pub const DEFAULT_MODEL_PATTERN: &str = "cars_pipe_*.pkl";

/// Default glob for exported test records.
pub const DEFAULT_TEST_PATTERN: &str = "*.json";

/// Environment variable naming the project base directory.
pub const PROJECT_PATH_ENV: &str = "PROJECT_PATH";

/// One test record: field name -> scalar value, in file order.
pub type Record = Map<String, Value>;

/// Resolved configuration for one prediction run.
///
/// Built once at startup and passed explicitly into every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Base directory; all data directories live under `<project_path>/data`.
    pub project_path: PathBuf,
    pub model_pattern: String,
    pub test_pattern: String,
}

impl RunConfig {
    pub fn new(project_path: impl Into<PathBuf>) -> Self {
        Self {
            project_path: project_path.into(),
            model_pattern: DEFAULT_MODEL_PATTERN.to_string(),
            test_pattern: DEFAULT_TEST_PATTERN.to_string(),
        }
    }

    /// Resolve the configuration from `PROJECT_PATH` (a `.env` file may supply it).
    ///
    /// Falls back to the current directory when the variable is unset.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let project_path = std::env::var_os(PROJECT_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(project_path)
    }

    pub fn models_dir(&self) -> PathBuf {
        self.data_dir().join("models")
    }

    pub fn test_dir(&self) -> PathBuf {
        self.data_dir().join("test")
    }

    pub fn predictions_dir(&self) -> PathBuf {
        self.data_dir().join("predictions")
    }

    fn data_dir(&self) -> PathBuf {
        self.project_path.join("data")
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// One output row: the record's identifier and price plus the predicted category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRow {
    pub id: Value,
    pub price: Value,
    pub predicted_price_category: String,
}
