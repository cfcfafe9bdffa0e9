//! Error types for the analysis pipeline.
//!
//! Every stage after loading is a pure function over in-memory data, so the
//! failures here are all contract violations: mismatched inputs, labels
//! outside a declared alphabet, or a table of the wrong shape for a test.

use thiserror::Error;

/// Which side of a contingency table a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Errors raised by the pure analysis stages.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// The two label sequences passed to the cross-tabulator differ in length.
    #[error("Size mismatch: {rows} row label(s) vs {columns} column label(s)")]
    LengthMismatch { rows: usize, columns: usize },

    /// A label does not belong to the declared label set of its axis.
    #[error("Label '{label}' is not in the declared {axis} labels {declared:?}")]
    UnknownLabel {
        label: String,
        axis: Axis,
        declared: Vec<String>,
    },

    /// The grouping mapping was applied to a label outside its domain.
    #[error("Label '{label}' is outside the grouping domain {domain:?}")]
    UnmappedLabel { label: String, domain: Vec<String> },

    /// The grouping mapping does not cover every label of its declared domain.
    #[error("Grouping mapping is not total: no target for {missing:?}")]
    IncompleteMapping { missing: Vec<String> },

    /// A 2x2 table was required.
    #[error("Expected a 2x2 table, got {rows}x{columns}")]
    NotTwoByTwo { rows: usize, columns: usize },

    /// Row and column labels must be identical and positionally aligned.
    #[error("Row labels {rows:?} and column labels {columns:?} are not aligned")]
    MisalignedLabels {
        rows: Vec<String>,
        columns: Vec<String>,
    },

    /// The table has no observations.
    #[error("Contingency table is empty")]
    EmptyTable,

    /// A row or column with zero total produces a zero expected frequency.
    #[error("Expected frequency is zero at cell ({row}, {column})")]
    ZeroExpected { row: usize, column: usize },

    /// The underlying distribution could not be constructed.
    #[error("Distribution error: {0}")]
    Distribution(String),
}
