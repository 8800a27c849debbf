//! Read, clean and write in one call.
//!
//! ```text
//! bytes ──▶ decode (latin-1) ──▶ Table ──▶ normalize_addition ──▶ split_rows ──▶ CRLF output
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use lotclean::{clean_file, CleanOptions};
//!
//! let stats = clean_file("lots.csv", "lots-clean.csv", &CleanOptions::default()).unwrap();
//! println!("{} rows in, {} rows out", stats.input_rows, stats.output_rows);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::normalize::normalize_with;
use super::operations::addition_operations;
use super::split::split_rows_with_stats;
use crate::error::{CleanResult, CsvError};
use crate::logs::{log_info, log_info_indent, log_success, log_success_indent, log_warning};
use crate::models::Table;
use crate::parser::{parse_bytes, ReadOptions};
use crate::writer::{write_table, write_table_file, WriteOptions};

/// Options for a cleaning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    /// Column holding addition names to normalize
    pub addition_column: String,

    /// Column holding comma-delimited lots to split
    pub lot_column: String,

    pub read: ReadOptions,

    pub write: WriteOptions,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            addition_column: "Addition".to_string(),
            lot_column: "Lot".to_string(),
            read: ReadOptions::default(),
            write: WriteOptions::default(),
        }
    }
}

impl CleanOptions {
    /// Parse options from a JSON string; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Counters for one cleaning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub input_rows: usize,
    pub output_rows: usize,
    /// Non-null addition cells rewritten
    pub normalized: usize,
    /// Input rows split into several output rows
    pub expanded: usize,
    /// Input rows kept as-is because the lot was null or held a semicolon
    pub passed_through: usize,
}

/// Result of [`clean_bytes`]
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub table: Table,
    pub stats: CleanStats,
}

/// Normalize the addition column, then split the lot column.
pub fn clean_table(mut table: Table, options: &CleanOptions) -> CleanResult<PipelineResult> {
    let input_rows = table.len();
    log_success(format!("Read {} rows, {} columns:", input_rows, table.columns.len()));
    for (i, col) in table.columns.iter().enumerate() {
        log_info_indent(format!("[{:2}] {}", i + 1, col), 1);
    }

    log_info(format!("Normalizing '{}'...", options.addition_column));
    let normalized = normalize_with(&mut table, &options.addition_column, &addition_operations())?;
    log_success_indent(format!("{} addition names normalized", normalized), 1);

    log_info(format!("Splitting '{}'...", options.lot_column));
    let (table, split) = split_rows_with_stats(&table, &options.lot_column)?;
    log_success_indent(
        format!(
            "{} rows expanded, {} kept as-is, {} rows out",
            split.expanded,
            split.passed_through,
            table.len()
        ),
        1,
    );

    let stats = CleanStats {
        input_rows,
        output_rows: table.len(),
        normalized,
        expanded: split.expanded,
        passed_through: split.passed_through,
    };
    Ok(PipelineResult { table, stats })
}

/// Decode, parse and clean raw input bytes.
pub fn clean_bytes(bytes: &[u8], options: &CleanOptions) -> CleanResult<PipelineResult> {
    log_info(format!(
        "Decoding as {} with delimiter '{}'",
        options.read.encoding,
        format_delimiter(options.read.delimiter)
    ));
    let table = parse_bytes(bytes, &options.read)?;
    if table.is_empty() {
        log_warning("Input has a header but no rows");
    }
    clean_table(table, options)
}

/// Clean raw bytes and render the result as output text.
pub fn clean_to_string(bytes: &[u8], options: &CleanOptions) -> CleanResult<String> {
    let result = clean_bytes(bytes, options)?;
    let mut buf = Vec::new();
    write_table(&result.table, &mut buf, &options.write)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Clean `input` into `output`.
///
/// The output file is only created once the whole table has been cleaned,
/// so a failing run leaves no output behind.
pub fn clean_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &CleanOptions,
) -> CleanResult<CleanStats> {
    let (input, output) = (input.as_ref(), output.as_ref());

    log_info(format!("Reading {}", input.display()));
    let bytes = std::fs::read(input).map_err(CsvError::from)?;
    let result = clean_bytes(&bytes, options)?;

    write_table_file(&result.table, output, &options.write)?;
    log_success(format!("Wrote {} rows to {}", result.stats.output_rows, output.display()));

    Ok(result.stats)
}

/// Format delimiter for display
fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PipelineError, TransformError};
    use serde_json::{json, Value};

    #[test]
    fn test_default_options() {
        let opts = CleanOptions::default();
        assert_eq!(opts.addition_column, "Addition");
        assert_eq!(opts.lot_column, "Lot");
        assert_eq!(opts.read.delimiter, ',');
        assert!(opts.write.write_index);
    }

    #[test]
    fn test_options_from_partial_json() {
        let opts = CleanOptions::from_json(
            r#"{"lot_column": "Lots", "read": {"encoding": "utf8"}, "write": {"write_index": false}}"#,
        )
        .unwrap();
        assert_eq!(opts.addition_column, "Addition");
        assert_eq!(opts.lot_column, "Lots");
        assert_eq!(opts.read.encoding, crate::parser::InputEncoding::Utf8);
        assert!(opts.read.null_values.contains(&"NA".to_string()));
        assert!(!opts.write.write_index);

        let back = CleanOptions::from_json(&opts.to_json().unwrap()).unwrap();
        assert_eq!(back, opts);
    }

    #[test]
    fn test_clean_table_scenario() {
        let mut table = Table::new(["Addition", "Lot"]);
        table.push_row([("Addition", json!("First Addition")), ("Lot", json!("1,2, 3"))]);
        table.push_row([("Addition", json!("Second")), ("Lot", json!("1;2"))]);
        table.push_row([("Addition", Value::Null), ("Lot", Value::Null)]);

        let result = clean_table(table, &CleanOptions::default()).unwrap();
        let lots: Vec<Value> = result.table.column("Lot").into_iter().cloned().collect();
        assert_eq!(lots, vec![json!("1"), json!("2"), json!("3"), json!("1;2"), Value::Null]);
        for record in &result.table.records[..3] {
            assert_eq!(record.get("Addition"), Some(&json!("1st addn")));
        }
        assert_eq!(result.table.records[3].get("Addition"), Some(&json!("2nd")));

        assert_eq!(
            result.stats,
            CleanStats {
                input_rows: 3,
                output_rows: 5,
                normalized: 2,
                expanded: 1,
                passed_through: 2,
            }
        );
    }

    #[test]
    fn test_normalized_count_matches_rewritten_cells() {
        let mut table = Table::new(["Addition", "Lot"]);
        table.push_row([("Addition", json!(" Third ")), ("Lot", json!("1"))]);
        table.push_row([("Addition", json!("")), ("Lot", json!("2"))]);
        table.push_row([("Addition", Value::Null), ("Lot", json!("3"))]);

        let result = clean_table(table, &CleanOptions::default()).unwrap();
        assert_eq!(result.stats.normalized, 2);
        let additions: Vec<Value> = result.table.column("Addition").into_iter().cloned().collect();
        assert_eq!(additions, vec![json!("3rd"), json!(""), Value::Null]);
    }

    #[test]
    fn test_clean_to_string() {
        let input = b"Addition,Lot,Price\r\nFirst Addition,\"1,2, 3\",100\r\nThird addition,4;5,\r\n";
        let text = clean_to_string(input, &CleanOptions::default()).unwrap();
        assert_eq!(
            text,
            ",Addition,Lot,Price\r\n\
             0,1st addn,1,100\r\n\
             0,1st addn,2,100\r\n\
             0,1st addn,3,100\r\n\
             1,3rd addn,4;5,\r\n"
        );
    }

    #[test]
    fn test_clean_bytes_missing_addition_column() {
        let err = clean_bytes(b"Name,Lot\nx,1\n", &CleanOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Transform(TransformError::ColumnNotFound(ref c)) if c == "Addition"
        ));
    }

    #[test]
    fn test_clean_bytes_missing_lot_column() {
        let err = clean_bytes(b"Addition,Lots\nx,1\n", &CleanOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Transform(TransformError::ColumnNotFound(ref c)) if c == "Lot"
        ));
    }

    #[test]
    fn test_clean_file_roundtrip_latin1() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        // "Première Addition" with a Latin-1 è
        std::fs::write(&input, b"Addition,Lot\nPremi\xE8re Addition,\"7, 8\"\n").unwrap();

        let stats = clean_file(&input, &output, &CleanOptions::default()).unwrap();
        assert_eq!(stats.output_rows, 2);

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, ",Addition,Lot\r\n0,première addn,7\r\n0,première addn,8\r\n");
    }

    #[test]
    fn test_clean_file_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "Title,Lot\nx,1\n").unwrap();

        assert!(clean_file(&input, &output, &CleanOptions::default()).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_clean_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = clean_file(dir.path().join("nope.csv"), dir.path().join("out.csv"), &CleanOptions::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Csv(CsvError::Io(_))));
    }
}
