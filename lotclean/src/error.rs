//! Error types for the lotclean pipeline.
//!
//! - [`CsvError`] - decoding and reading delimited text
//! - [`TransformError`] - normalizer and splitter failures
//! - [`PipelineError`] - top-level errors of a cleaning run
//!
//! Conversion is automatic via `From` implementations, so `?` works across
//! the reader, the transformations and the writer.

use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while decoding or reading the input table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read the input file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Input bytes are not valid in the configured encoding.
    #[error("Failed to decode input as {encoding}: {message}")]
    Encoding { encoding: String, message: String },

    /// The delimited text could not be tokenized.
    #[error("Invalid CSV format: {0}")]
    Parse(#[from] csv::Error),

    /// Delimiter must be a single ASCII character.
    #[error("Unsupported delimiter {0:?}: must be a single ASCII character")]
    InvalidDelimiter(char),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// Header row has no columns.
    #[error("No headers found in CSV")]
    NoHeaders,

    /// A data row has more fields than the header.
    #[error("Line {line}: expected {expected} fields, saw {found}")]
    Malformed {
        line: u64,
        expected: usize,
        found: usize,
    },
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors raised by the normalizer and the splitter.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// The requested column is not part of the table.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A cell holds something other than a string or null.
    #[error("Invalid value in column '{column}' at row {row}: expected string or null, found {found}")]
    InvalidValueType {
        column: String,
        row: usize,
        found: String,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level errors of a cleaning run.
///
/// Reading and writing failures both surface as [`PipelineError::Csv`].
/// Returned by [`crate::transform::pipeline::clean_file`] and friends.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for reading operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for a whole cleaning run.
pub type CleanResult<T> = Result<T, PipelineError>;
