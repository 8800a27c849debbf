//! Addition name normalizer.
//!
//! Rewrites one column in place: trim, lowercase, then the abbreviation
//! substitutions of [`ABBREVIATIONS`](super::operations::ABBREVIATIONS).

use serde_json::Value;

use super::operations::{addition_operations, apply_all_str, Operation};
use crate::error::TransformResult;
use crate::models::Table;

/// Normalize the addition names held in `column`.
///
/// Every non-null value is rewritten; null values are left alone and no
/// other column is touched. The table is checked before anything is
/// rewritten, so on error it is unchanged.
///
/// # Errors
/// - [`TransformError::ColumnNotFound`](crate::error::TransformError::ColumnNotFound)
///   if `column` is not in the table
/// - [`TransformError::InvalidValueType`](crate::error::TransformError::InvalidValueType)
///   if a cell in `column` is neither a string nor null
///
/// # Example
/// ```
/// use lotclean::{normalize_addition, Table};
/// use serde_json::json;
///
/// let mut table = Table::new(["Addition"]);
/// table.push_row([("Addition", json!(" Second Addition "))]);
/// normalize_addition(&mut table, "Addition").unwrap();
/// assert_eq!(table.records[0].get("Addition"), Some(&json!("2nd addn")));
/// ```
pub fn normalize_addition<'a>(table: &'a mut Table, column: &str) -> TransformResult<&'a mut Table> {
    normalize_with(table, column, &addition_operations())?;
    Ok(table)
}

/// Apply an arbitrary operation chain to every non-null value of `column`.
///
/// Returns the number of rewritten cells.
pub fn normalize_with(table: &mut Table, column: &str, operations: &[Operation]) -> TransformResult<usize> {
    table.require_column(column)?;
    for record in &table.records {
        record.text(column)?;
    }

    let mut rewritten = 0;
    for record in &mut table.records {
        if let Some(Value::String(s)) = record.values.get_mut(column) {
            *s = apply_all_str(operations, s);
            rewritten += 1;
        }
    }

    Ok(rewritten)
}
