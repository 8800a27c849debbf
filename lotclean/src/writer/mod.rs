//! Delimited text writer.
//!
//! Output is UTF-8 with CRLF line terminators. A leading, unnamed column
//! carries each record's input position, so rows produced by splitting the
//! same input row share an index.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::CsvResult;
use crate::models::Table;
use crate::parser::delimiter_byte;

/// Settings for writing the output table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    pub delimiter: char,
    /// Prepend the input row index as an unnamed first column.
    pub write_index: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            write_index: true,
        }
    }
}

/// Write `table` as delimited text to `writer`.
pub fn write_table<W: Write>(table: &Table, writer: W, options: &WriteOptions) -> CsvResult<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter_byte(options.delimiter)?)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    let mut header: Vec<&str> = Vec::with_capacity(table.columns.len() + 1);
    if options.write_index {
        header.push("");
    }
    header.extend(table.columns.iter().map(String::as_str));
    out.write_record(&header)?;

    for record in &table.records {
        let mut fields: Vec<String> = Vec::with_capacity(header.len());
        if options.write_index {
            fields.push(record.index.to_string());
        }
        for column in &table.columns {
            fields.push(cell_text(record.get(column)));
        }
        out.write_record(&fields)?;
    }

    out.flush()?;
    Ok(())
}

/// Write a table to `path`, creating or truncating the file.
pub fn write_table_file<P: AsRef<Path>>(table: &Table, path: P, options: &WriteOptions) -> CsvResult<()> {
    let file = File::create(path.as_ref())?;
    write_table(table, BufWriter::new(file), options)
}

/// Render a table to an in-memory string.
pub fn table_to_string(table: &Table, options: &WriteOptions) -> CsvResult<String> {
    let mut buf = Vec::new();
    write_table(table, &mut buf, options)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Null is an empty field; non-text values are written as their JSON text.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
