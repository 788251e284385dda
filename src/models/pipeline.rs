//! The predictor seam and the preprocessing + classifier pipeline behind it.

use serde::{Deserialize, Serialize};

use crate::data::Table;
use crate::error::AppError;
use crate::models::classifier::Classifier;
use crate::models::preprocess::ColumnTransformer;

/// Anything that can label every row of a table.
pub trait Predictor {
    /// Return one label per row, in row order.
    fn predict(&self, table: &Table) -> Result<Vec<String>, AppError>;
}

/// A fitted preprocessing step followed by a classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub preprocessor: ColumnTransformer,
    pub classifier: Classifier,
}

impl Pipeline {
    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        self.preprocessor.validate()?;
        self.classifier.validate(self.preprocessor.n_features())
    }
}

impl Predictor for Pipeline {
    fn predict(&self, table: &Table) -> Result<Vec<String>, AppError> {
        let features = self.preprocessor.transform(table)?;
        let labels: Vec<String> = features
            .iter()
            .map(|row| self.classifier.predict_row(row).to_string())
            .collect();

        if labels.len() != table.n_rows() {
            return Err(AppError::prediction(format!(
                "model returned {} labels for {} rows",
                labels.len(),
                table.n_rows()
            )));
        }
        Ok(labels)
    }
}
