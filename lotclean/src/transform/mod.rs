//! Transformation module.
//!
//! - Operations: ordered cell rewrites used by the normalizer
//! - Normalize: addition name normalization (in place)
//! - Split: multi-lot row expansion (new table)
//! - Pipeline: read, normalize, split, write

pub mod normalize;
pub mod operations;
pub mod pipeline;
pub mod split;

pub use normalize::{normalize_addition, normalize_with};
pub use operations::{addition_operations, operations_description, Operation, ABBREVIATIONS};
pub use pipeline::*;
pub use split::{expected_row_count, split_rows, split_rows_with_stats, SplitStats};
