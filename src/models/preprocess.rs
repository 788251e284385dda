//! Column transformer: imputation, scaling and one-hot encoding.
//!
//! Produces a dense row-major feature matrix with the numeric features first
//! (in declaration order), followed by each categorical feature's one-hot block.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::Table;
use crate::error::AppError;

/// A numeric input column: impute, then standardize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericFeature {
    pub column: String,
    /// Substitute for null / missing cells.
    pub fill_value: f64,
    pub mean: f64,
    /// A zero scale is treated as 1 (constant training column).
    pub scale: f64,
}

impl NumericFeature {
    fn transform(&self, cell: &Value, row: usize) -> Result<f64, AppError> {
        let raw = match cell {
            Value::Null => self.fill_value,
            Value::Number(n) => n.as_f64().unwrap_or(self.fill_value),
            Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
                AppError::prediction(format!(
                    "column '{}' row {row}: cannot convert '{s}' to a number",
                    self.column
                ))
            })?,
            other => {
                return Err(AppError::prediction(format!(
                    "column '{}' row {row}: expected a number, got {other}",
                    self.column
                )));
            }
        };
        let raw = if raw.is_finite() { raw } else { self.fill_value };
        let scale = if self.scale == 0.0 { 1.0 } else { self.scale };
        Ok((raw - self.mean) / scale)
    }
}

/// A categorical input column: impute, then one-hot encode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalFeature {
    pub column: String,
    pub fill_value: String,
    /// Known categories; values outside this list encode to all zeros.
    pub categories: Vec<String>,
}

impl CategoricalFeature {
    fn encode_into(&self, cell: &Value, out: &mut [f64]) {
        let value = match cell {
            Value::Null => self.fill_value.clone(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        out.fill(0.0);
        if let Some(idx) = self.categories.iter().position(|c| *c == value) {
            out[idx] = 1.0;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformer {
    #[serde(default)]
    pub numeric: Vec<NumericFeature>,
    #[serde(default)]
    pub categorical: Vec<CategoricalFeature>,
}

impl ColumnTransformer {
    /// Width of each transformed row.
    pub fn n_features(&self) -> usize {
        self.numeric.len() + self.categorical.iter().map(|c| c.categories.len()).sum::<usize>()
    }

    /// Input columns the transformer reads, in feature order.
    pub fn input_columns(&self) -> impl Iterator<Item = &str> {
        self.numeric
            .iter()
            .map(|f| f.column.as_str())
            .chain(self.categorical.iter().map(|f| f.column.as_str()))
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        for f in &self.numeric {
            if !(f.mean.is_finite() && f.scale.is_finite() && f.fill_value.is_finite()) {
                return Err(format!("numeric feature '{}' has non-finite parameters", f.column));
            }
        }
        for f in &self.categorical {
            if f.categories.is_empty() {
                return Err(format!("categorical feature '{}' has no categories", f.column));
            }
        }
        Ok(())
    }

    /// Transform every row of `table` into a feature vector.
    pub fn transform(&self, table: &Table) -> Result<Vec<Vec<f64>>, AppError> {
        let missing = table.missing_columns(self.input_columns());
        if !missing.is_empty() {
            return Err(AppError::prediction(format!(
                "columns are missing: {}",
                missing.join(", ")
            )));
        }

        let width = self.n_features();
        let mut rows = vec![vec![0.0; width]; table.n_rows()];

        for (offset, feature) in self.numeric.iter().enumerate() {
            let cells = table.column(&feature.column).unwrap_or_default();
            for (row, cell) in cells.iter().enumerate() {
                rows[row][offset] = feature.transform(cell, row)?;
            }
        }

        let mut offset = self.numeric.len();
        for feature in &self.categorical {
            let block = offset..offset + feature.categories.len();
            let cells = table.column(&feature.column).unwrap_or_default();
            for (row, cell) in cells.iter().enumerate() {
                feature.encode_into(cell, &mut rows[row][block.clone()]);
            }
            offset = block.end;
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;
    use serde_json::json;

    fn table(rows: Value) -> Table {
        let records: Vec<Record> = serde_json::from_value(rows).unwrap();
        Table::from_records(records)
    }

    fn transformer() -> ColumnTransformer {
        ColumnTransformer {
            numeric: vec![NumericFeature {
                column: "year".to_string(),
                fill_value: 2010.0,
                mean: 2010.0,
                scale: 5.0,
            }],
            categorical: vec![CategoricalFeature {
                column: "fuel".to_string(),
                fill_value: "gas".to_string(),
                categories: vec!["diesel".to_string(), "gas".to_string()],
            }],
        }
    }

    #[test]
    fn scales_imputes_and_one_hot_encodes() {
        let t = table(json!([
            {"year": 2020, "fuel": "diesel"},
            {"year": null, "fuel": null},
            {"year": "2005", "fuel": "electric"},
        ]));

        let rows = transformer().transform(&t).unwrap();
        assert_eq!(rows[0], [2.0, 1.0, 0.0]);
        assert_eq!(rows[1], [0.0, 0.0, 1.0]);
        assert_eq!(rows[2], [-1.0, 0.0, 0.0]);
    }

    #[test]
    fn zero_scale_is_treated_as_one() {
        let mut tr = transformer();
        tr.numeric[0].scale = 0.0;
        let t = table(json!([{"year": 2012, "fuel": "gas"}]));
        let rows = tr.transform(&t).unwrap();
        assert_eq!(rows[0][0], 2.0);
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let t = table(json!([{"id": 1}]));
        let err = transformer().transform(&t).unwrap_err();
        assert_eq!(err.to_string(), "Prediction failed: columns are missing: year, fuel");
    }

    #[test]
    fn non_numeric_cell_fails() {
        let t = table(json!([{"year": "old", "fuel": "gas"}]));
        let err = transformer().transform(&t).unwrap_err();
        assert!(matches!(err, AppError::Prediction(_)));
    }

    #[test]
    fn counts_features() {
        assert_eq!(transformer().n_features(), 3);
        assert!(transformer().validate().is_ok());
    }
}
