//! Data table layer for the trellis charting library
//!
//! Wraps an Arrow record batch with the dimension metadata charts work
//! in terms of: axis dimension names mapped to concrete columns, typed
//! value access with null/NaN recovery, and a row-identity diff used
//! for incremental rendering.

pub mod diff;
pub mod table;

use thiserror::Error;

// Re-exports
pub use diff::TableDiff;
pub use table::{DataTable, DimensionInfo, DimensionKind};

/// Errors that can occur in data operations.
///
/// These are all configuration-class errors surfaced at table
/// construction time; bad cells (null, NaN, unknown category) are
/// recovered locally during access and never error.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("unknown dimension: {0}")]
    UnknownDimension(String),

    #[error("column {column} has type {actual}, expected {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        actual: String,
    },
}
