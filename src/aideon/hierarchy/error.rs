use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, HierarchyError>;

/// Error type covering the failures that can occur while hierarchies are
/// built, queried, reconstructed, or moved in and out of files.
#[derive(Debug, Error)]
pub enum HierarchyError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when a delimited text file cannot be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a workbook does not carry the expected node sheet layout.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when a persisted table lacks one of the node columns.
    #[error("missing column '{0}'")]
    MissingColumn(String),

    /// Raised when a persisted cell cannot be converted back into a node field.
    #[error("invalid value '{value}' in column {column}")]
    InvalidCell { column: String, value: String },

    /// No row carries the requested id.
    #[error("node {0} not found")]
    NodeNotFound(u64),

    /// More than one row carries the requested id.
    #[error("node id {0} is not unique")]
    AmbiguousNode(u64),

    /// The table has no row with `parent_id == 0`.
    #[error("table has no root node")]
    RootNotFound,

    /// A value does not fit the narrow width of a compact column.
    #[error("value {value} does not fit compact column {column}")]
    ColumnOverflow { column: &'static str, value: u64 },

    /// Raised when a settings file contains unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
