//! Delimited text reader with a fixed input encoding.
//!
//! Decodes raw bytes (Latin-1 by default), tokenizes them with the `csv`
//! crate and builds a [`Table`]. Header names are made unique the way
//! dataframe tools do, and the usual missing-value tokens become null.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::{Record, Table};

/// Tokens read as null: the usual spreadsheet and dataframe missing-value markers.
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Fixed text encoding of the input file. No detection is attempted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputEncoding {
    /// ISO-8859-1: every byte is the code point of the same value.
    #[default]
    Latin1,
    Windows1252,
    Utf8,
}

impl fmt::Display for InputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputEncoding::Latin1 => "iso-8859-1",
            InputEncoding::Windows1252 => "windows-1252",
            InputEncoding::Utf8 => "utf-8",
        };
        f.write_str(name)
    }
}

/// Settings for reading the input table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    pub encoding: InputEncoding,
    pub delimiter: char,
    /// Field values that are read as null.
    pub null_values: Vec<String>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            encoding: InputEncoding::default(),
            delimiter: ',',
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Decode bytes to a string using the given encoding.
pub fn decode_content(bytes: &[u8], encoding: InputEncoding) -> CsvResult<Cow<'_, str>> {
    match encoding {
        InputEncoding::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes)),
        InputEncoding::Windows1252 => {
            Ok(encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes).0)
        }
        InputEncoding::Utf8 => {
            let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
            std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|e| CsvError::Encoding {
                    encoding: encoding.to_string(),
                    message: e.to_string(),
                })
        }
    }
}

/// Convert a delimiter character to the byte the `csv` crate expects.
pub(crate) fn delimiter_byte(delimiter: char) -> CsvResult<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(CsvError::InvalidDelimiter(delimiter))
    }
}

/// Parse decoded text into a [`Table`].
///
/// The first non-blank line is the header. Short rows are padded with null,
/// long rows are rejected.
///
/// # Example
/// ```
/// use lotclean::parser::{parse_table, ReadOptions};
///
/// let table = parse_table("Addition,Lot\nFirst Addition,\"1,2\"\n", &ReadOptions::default()).unwrap();
/// assert_eq!(table.columns, vec!["Addition", "Lot"]);
/// assert_eq!(table.records[0].get("Lot").unwrap(), "1,2");
/// ```
pub fn parse_table(content: &str, options: &ReadOptions) -> CsvResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte(options.delimiter)?)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let null_values: HashSet<&str> = options.null_values.iter().map(String::as_str).collect();
    let mut rows = reader.records();

    let header = match rows.next() {
        Some(record) => record?,
        None => return Err(CsvError::EmptyFile),
    };
    if header.is_empty() {
        return Err(CsvError::NoHeaders);
    }
    let columns = unique_headers(header.iter());

    let mut table = Table::new(columns);
    for record in rows {
        let record = record?;
        if record.len() > table.columns.len() {
            return Err(CsvError::Malformed {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected: table.columns.len(),
                found: record.len(),
            });
        }

        let values: Map<String, Value> = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = match record.get(i) {
                    Some(raw) if !null_values.contains(raw) => Value::String(raw.to_string()),
                    _ => Value::Null,
                };
                (column.clone(), value)
            })
            .collect();

        let index = table.records.len();
        table.records.push(Record::new(index, values));
    }

    Ok(table)
}

/// Decode and parse raw bytes.
pub fn parse_bytes(bytes: &[u8], options: &ReadOptions) -> CsvResult<Table> {
    let content = decode_content(bytes, options.encoding)?;
    parse_table(&content, options)
}

/// Read, decode and parse a file.
pub fn read_table_file<P: AsRef<Path>>(path: P, options: &ReadOptions) -> CsvResult<Table> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, options)
}

/// Name empty headers `Unnamed: <pos>` and suffix repeats with `.1`, `.2`, ...
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();

    for (pos, name) in raw.enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {}", pos)
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        let mut n = 0;
        while columns.contains(&candidate) {
            n += 1;
            candidate = format!("{}.{}", base, n);
        }
        columns.push(candidate);
    }

    columns
}
