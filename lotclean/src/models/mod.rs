//! In-memory table model shared by the reader, the transformations and the writer.
//!
//! - [`Table`] - ordered columns plus ordered records
//! - [`Record`] - one row, keyed by column name, remembering its input position
//!
//! Cells are `serde_json::Value`s: `Value::String` for text and `Value::Null`
//! for a missing value. Other variants can only come from callers building
//! tables by hand and are rejected by the transformations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{TransformError, TransformResult};

// =============================================================================
// Record
// =============================================================================

/// A single row of a [`Table`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Position of the source row in the input (0-based, header excluded).
    pub index: usize,
    /// Cell values keyed by column name.
    pub values: Map<String, Value>,
}

impl Record {
    pub fn new(index: usize, values: Map<String, Value>) -> Self {
        Self { index, values }
    }

    /// Cell value for `column`, `None` if the column is unknown to this record.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Copy of this record with one cell replaced.
    pub fn with_value(&self, column: &str, value: Value) -> Self {
        let mut values = self.values.clone();
        values.insert(column.to_string(), value);
        Self {
            index: self.index,
            values,
        }
    }

    /// Borrow a cell as text, treating null as `None`.
    ///
    /// Fails with [`TransformError::InvalidValueType`] for any other variant.
    pub fn text(&self, column: &str) -> TransformResult<Option<&str>> {
        match self.values.get(column) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(TransformError::InvalidValueType {
                column: column.to_string(),
                row: self.index,
                found: value_kind(other).to_string(),
            }),
        }
    }
}

// =============================================================================
// Table
// =============================================================================

/// Ordered records sharing an ordered column set.
///
/// Every record holds a value (possibly null) for every column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            records: Vec::new(),
        }
    }

    /// Append a row built from `(column, value)` pairs.
    ///
    /// Columns missing from `cells` are filled with null, unknown columns are
    /// dropped. The record index is the current row count.
    pub fn push_row<I, K>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut given: Map<String, Value> = cells.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let values = self
            .columns
            .iter()
            .map(|c| (c.clone(), given.remove(c).unwrap_or(Value::Null)))
            .collect();
        let index = self.records.len();
        self.records.push(Record::new(index, values));
    }

    /// Check whether `column` belongs to the column set.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fail with [`TransformError::ColumnNotFound`] unless `column` exists.
    pub fn require_column(&self, column: &str) -> TransformResult<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(TransformError::ColumnNotFound(column.to_string()))
        }
    }

    /// All values of one column in row order.
    pub fn column(&self, column: &str) -> Vec<&Value> {
        self.records
            .iter()
            .map(|r| r.get(column).unwrap_or(&Value::Null))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Short name of a JSON value variant, used in error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_push_row_fills_missing_columns() {
        let mut table = Table::new(["Addition", "Lot"]);
        table.push_row([("Lot", json!("1,2"))]);

        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].get("Addition"), Some(&Value::Null));
        assert_eq!(table.records[0].get("Lot"), Some(&json!("1,2")));
    }

    #[test]
    fn test_push_row_assigns_indices() {
        let mut table = Table::new(["Lot"]);
        table.push_row([("Lot", json!("a"))]);
        table.push_row([("Lot", json!("b"))]);

        assert_eq!(table.records[0].index, 0);
        assert_eq!(table.records[1].index, 1);
    }

    #[test]
    fn test_require_column() {
        let table = Table::new(["Lot"]);
        assert!(table.require_column("Lot").is_ok());
        assert_eq!(
            table.require_column("Addition"),
            Err(TransformError::ColumnNotFound("Addition".into()))
        );
    }

    #[test]
    fn test_text_rejects_non_string() {
        let mut table = Table::new(["Lot"]);
        table.push_row([("Lot", json!(12))]);

        let err = table.records[0].text("Lot").unwrap_err();
        assert_eq!(
            err,
            TransformError::InvalidValueType {
                column: "Lot".into(),
                row: 0,
                found: "number".into(),
            }
        );
    }

    #[test]
    fn test_with_value_keeps_index() {
        let mut table = Table::new(["Addition", "Lot"]);
        table.push_row([("Addition", json!("x")), ("Lot", json!("1,2"))]);

        let copy = table.records[0].with_value("Lot", json!("1"));
        assert_eq!(copy.index, 0);
        assert_eq!(copy.get("Addition"), Some(&json!("x")));
        assert_eq!(copy.get("Lot"), Some(&json!("1")));
        assert_eq!(table.records[0].get("Lot"), Some(&json!("1,2")));
    }
}
