//! Cell operations for normalizing text columns.
//!
//! An ordered list of operations is applied to a cell's text, each one on
//! the result of the previous. Null cells never reach the chain.

use serde::{Deserialize, Serialize};

/// Abbreviations applied to addition names, in application order.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("addition", "addn"),
    ("first", "1st"),
    ("second", "2nd"),
    ("third", "3rd"),
    ("fourth", "4th"),
    ("fifth", "5th"),
];

/// All available cell operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Remove leading and trailing whitespace
    Trim,

    /// Convert to lowercase
    Lowercase,

    /// Convert to uppercase
    Uppercase,

    /// Replace every non-overlapping occurrence of a literal substring
    Replace {
        pattern: String,
        #[serde(default)]
        value: String,
    },
}

impl Operation {
    pub fn replace(pattern: impl Into<String>, value: impl Into<String>) -> Self {
        Operation::Replace {
            pattern: pattern.into(),
            value: value.into(),
        }
    }

    /// Apply this operation to text
    pub fn apply_str(&self, s: &str) -> String {
        match self {
            Operation::Trim => s.trim().to_string(),
            Operation::Lowercase => s.to_lowercase(),
            Operation::Uppercase => s.to_uppercase(),
            // An empty pattern would match between every character
            Operation::Replace { pattern, .. } if pattern.is_empty() => s.to_string(),
            Operation::Replace { pattern, value } => s.replace(pattern.as_str(), value),
        }
    }
}

/// Apply operations in sequence to text.
pub fn apply_all_str(operations: &[Operation], s: &str) -> String {
    operations
        .iter()
        .fold(s.to_string(), |acc, op| op.apply_str(&acc))
}

/// The fixed addition-name chain: trim, lowercase, then [`ABBREVIATIONS`].
pub fn addition_operations() -> Vec<Operation> {
    let mut ops = vec![Operation::Trim, Operation::Lowercase];
    ops.extend(
        ABBREVIATIONS
            .iter()
            .map(|(pattern, value)| Operation::replace(*pattern, *value)),
    );
    ops
}

/// Get a description of the addition normalization for help output
pub fn operations_description() -> String {
    let mut text = String::from("Addition normalization (applied in order):\n");
    text.push_str("  1. trim surrounding whitespace\n");
    text.push_str("  2. lowercase\n");
    for (i, (pattern, value)) in ABBREVIATIONS.iter().enumerate() {
        text.push_str(&format!("  {}. \"{}\" -> \"{}\"\n", i + 3, pattern, value));
    }
    text
}
