//! Column-oriented table assembled from test records.

use indexmap::IndexMap;
use serde_json::Value;

use crate::domain::Record;

/// Records laid out as named columns of equal length.
///
/// Columns appear in first-seen order across the records; a record that lacks
/// a column contributes a `Null` cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: IndexMap<String, Vec<Value>>,
    n_rows: usize,
}

impl Table {
    /// Union the keys of all records and align cells to record order.
    pub fn from_records(records: Vec<Record>) -> Self {
        let n_rows = records.len();
        let mut columns: IndexMap<String, Vec<Value>> = IndexMap::new();

        for (row, record) in records.into_iter().enumerate() {
            for (key, value) in record {
                let cells = columns
                    .entry(key)
                    .or_insert_with(|| vec![Value::Null; n_rows]);
                cells[row] = value;
            }
        }

        Self { columns, n_rows }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Names from `required` that are not columns of this table.
    pub fn missing_columns<'a>(&self, required: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        required
            .into_iter()
            .filter(|name| !self.columns.contains_key(*name))
            .collect()
    }
}
