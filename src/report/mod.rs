//! Reporting utilities: prediction rows and the category summary.

use std::collections::BTreeMap;

use crate::data::Table;
use crate::domain::PredictionRow;
use crate::error::AppError;

/// Pair each row's `id` and `price` with its predicted category.
pub fn build_prediction_rows(table: &Table, labels: Vec<String>) -> Result<Vec<PredictionRow>, AppError> {
    let ids = required_column(table, "id")?;
    let prices = required_column(table, "price")?;
    if labels.len() != table.n_rows() {
        return Err(AppError::prediction(format!(
            "got {} labels for {} rows",
            labels.len(),
            table.n_rows()
        )));
    }

    Ok(ids
        .iter()
        .zip(prices)
        .zip(labels)
        .map(|((id, price), label)| PredictionRow {
            id: id.clone(),
            price: price.clone(),
            predicted_price_category: label,
        })
        .collect())
}

fn required_column<'a>(table: &'a Table, name: &str) -> Result<&'a [serde_json::Value], AppError> {
    table
        .column(name)
        .ok_or_else(|| AppError::prediction(format!("input records have no '{name}' column")))
}

/// One line per predicted category with its count, alphabetically.
pub fn format_category_summary(rows: &[PredictionRow]) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.predicted_price_category.as_str()).or_default() += 1;
    }

    let width = counts.keys().map(|k| k.len()).max().unwrap_or(0);
    counts
        .iter()
        .map(|(category, n)| format!("{category:<width$}  {n}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;
    use serde_json::{Value, json};

    fn table(rows: Value) -> Table {
        let records: Vec<Record> = serde_json::from_value(rows).unwrap();
        Table::from_records(records)
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rows_keep_input_order() {
        let t = table(json!([
            {"id": 3, "price": 300},
            {"id": 1, "price": 100},
            {"id": 2, "price": 200},
        ]));

        let rows = build_prediction_rows(&t, labels(&["high", "low", "medium"])).unwrap();
        let ids: Vec<&Value> = rows.iter().map(|r| &r.id).collect();
        assert_eq!(ids, [&json!(3), &json!(1), &json!(2)]);
        assert_eq!(rows[0].price, json!(300));
        assert_eq!(rows[2].predicted_price_category, "medium");
    }

    #[test]
    fn missing_price_column_fails() {
        let t = table(json!([{"id": 1}]));
        let err = build_prediction_rows(&t, labels(&["low"])).unwrap_err();
        assert_eq!(err.to_string(), "Prediction failed: input records have no 'price' column");
    }

    #[test]
    fn label_count_must_match_rows() {
        let t = table(json!([{"id": 1, "price": 1}, {"id": 2, "price": 2}]));
        assert!(build_prediction_rows(&t, labels(&["low"])).is_err());
    }

    #[test]
    fn summary_counts_categories() {
        let t = table(json!([
            {"id": 1, "price": 1},
            {"id": 2, "price": 2},
            {"id": 3, "price": 3},
        ]));
        let rows = build_prediction_rows(&t, labels(&["low", "high", "low"])).unwrap();
        assert_eq!(format_category_summary(&rows), "high  1\nlow   2");
    }
}
