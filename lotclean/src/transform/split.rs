//! Lot splitter.
//!
//! One input row whose lot cell holds a comma-delimited list becomes one
//! output row per list element. Rows with a null lot, or a lot containing a
//! semicolon, are passed through as they are.

use serde_json::Value;

use crate::error::TransformResult;
use crate::models::{Record, Table};

/// Separator between lots in a multi-lot cell.
pub const LOT_SEPARATOR: char = ',';

/// Presence of this character marks a lot cell that must not be split.
pub const NO_SPLIT_MARKER: char = ';';

/// Counters collected while splitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitStats {
    /// Input rows emitted as-is (null or semicolon lot).
    pub passed_through: usize,
    /// Input rows that produced more than one output row.
    pub expanded: usize,
}

/// What the splitter does with one lot cell.
#[derive(Debug, PartialEq, Eq)]
enum LotAction<'a> {
    Keep,
    Split(Vec<&'a str>),
}

fn lot_action<'a>(record: &'a Record, column: &str) -> TransformResult<LotAction<'a>> {
    match record.text(column)? {
        None => Ok(LotAction::Keep),
        Some(lot) if lot.contains(NO_SPLIT_MARKER) => Ok(LotAction::Keep),
        Some(lot) => Ok(LotAction::Split(lot.split(LOT_SEPARATOR).map(str::trim).collect())),
    }
}

/// Build a new table with multi-lot rows expanded.
///
/// Output rows keep the input order; rows derived from one input row are
/// consecutive and follow the left-to-right order of its lots. Every derived
/// row is a copy of its source row with the lot cell replaced by one trimmed
/// part, and keeps the source row's index. The input table is not modified.
///
/// # Errors
/// - [`TransformError::ColumnNotFound`](crate::error::TransformError::ColumnNotFound)
///   if `column` is not in the table
/// - [`TransformError::InvalidValueType`](crate::error::TransformError::InvalidValueType)
///   if a lot cell is neither a string nor null
///
/// # Example
/// ```
/// use lotclean::{split_rows, Table};
/// use serde_json::json;
///
/// let mut table = Table::new(["Lot"]);
/// table.push_row([("Lot", json!("1,2, 3"))]);
/// let split = split_rows(&table, "Lot").unwrap();
/// let lots: Vec<_> = split.column("Lot").into_iter().cloned().collect();
/// assert_eq!(lots, vec![json!("1"), json!("2"), json!("3")]);
/// ```
pub fn split_rows(table: &Table, column: &str) -> TransformResult<Table> {
    split_rows_with_stats(table, column).map(|(table, _)| table)
}

/// [`split_rows`], also reporting how many rows were expanded or passed through.
pub fn split_rows_with_stats(table: &Table, column: &str) -> TransformResult<(Table, SplitStats)> {
    table.require_column(column)?;

    let mut stats = SplitStats::default();
    let mut records = Vec::with_capacity(table.records.len());

    for record in &table.records {
        match lot_action(record, column)? {
            LotAction::Keep => {
                stats.passed_through += 1;
                records.push(record.clone());
            }
            LotAction::Split(parts) => {
                if parts.len() > 1 {
                    stats.expanded += 1;
                }
                records.extend(
                    parts
                        .into_iter()
                        .map(|part| record.with_value(column, Value::String(part.to_string()))),
                );
            }
        }
    }

    Ok((
        Table {
            columns: table.columns.clone(),
            records,
        },
        stats,
    ))
}

/// Number of rows [`split_rows`] will produce for `table`.
pub fn expected_row_count(table: &Table, column: &str) -> TransformResult<usize> {
    table.require_column(column)?;
    table.records.iter().try_fold(0, |acc, record| {
        Ok(acc
            + match lot_action(record, column)? {
                LotAction::Keep => 1,
                LotAction::Split(parts) => parts.len(),
            })
    })
}
