//! # lotclean - addition normalization and lot splitting for auction CSV files
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│   Parser    │────▶│  Transform  │────▶│  CSV File   │
//! │  (Latin-1)  │     │  (Table)    │     │ (norm+split)│     │ (UTF-8 CRLF)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use lotclean::{normalize_addition, split_rows, Table};
//! use serde_json::json;
//!
//! let mut table = Table::new(["Addition", "Lot"]);
//! table.push_row([("Addition", json!("First Addition")), ("Lot", json!("1,2, 3"))]);
//!
//! normalize_addition(&mut table, "Addition").unwrap();
//! let split = split_rows(&table, "Lot").unwrap();
//!
//! assert_eq!(split.len(), 3);
//! assert_eq!(split.records[2].get("Lot"), Some(&json!("3")));
//! assert_eq!(split.records[2].get("Addition"), Some(&json!("1st addn")));
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Table and record model
//! - [`parser`] - Decoding and reading delimited text
//! - [`writer`] - CRLF output with the row index column
//! - [`transform`] - Normalizer, splitter and pipeline
//! - [`logs`] - Pipeline log helpers

// Core modules
pub mod error;
pub mod models;

// Reading and writing
pub mod parser;
pub mod writer;

// Transformation
pub mod transform;

// Logging
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CleanResult, CsvError, CsvResult, PipelineError, TransformError, TransformResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Record, Table};

// =============================================================================
// Re-exports - Reading / Writing
// =============================================================================

pub use parser::{
    decode_content, parse_bytes, parse_table, read_table_file, InputEncoding, ReadOptions,
    DEFAULT_NULL_VALUES,
};
pub use writer::{table_to_string, write_table, write_table_file, WriteOptions};

// =============================================================================
// Re-exports - Transformations
// =============================================================================

pub use transform::{
    addition_operations, normalize_addition, operations_description, split_rows, Operation,
    ABBREVIATIONS,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    clean_bytes, clean_file, clean_table, clean_to_string, CleanOptions, CleanStats,
    PipelineResult,
};
