//! Error types.
//!
//! Only construction can fail. Runtime misuse (sorting by a column that is
//! not sortable, hiding a fixed column, selecting out of range) is ignored
//! and logged at debug level instead.

use thiserror::Error;

/// The table cannot be built from the given configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("invalid container handle {0:?}: expected a non-empty element id without whitespace")]
    InvalidContainer(String),

    #[error("column group {0:?} has no children")]
    EmptyGroup(String),

    #[error("column tree has no leaf columns")]
    NoColumns,

    #[error("column {column:?} uses unknown cell type {cell_type:?}")]
    UnknownCellType { column: String, cell_type: String },

    #[error("invalid display command {0:?}")]
    InvalidCommand(String),
}
