//! Error types for the kom-core library.
//!
//! Only document-level faults surface as errors. Cell access and coercion
//! faults are absorbed by the grid and the coercers, and structural gaps in
//! a sheet become validation warnings on the record.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the kom library.
#[derive(Error, Debug)]
pub enum KomError {
    /// Workbook could not be opened or has no usable sheet.
    #[error("workbook error: {0}")]
    Workbook(#[from] WorkbookError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to opening a spreadsheet document.
#[derive(Error, Debug)]
pub enum WorkbookError {
    /// The file does not exist.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// The extension is not a spreadsheet format we can read.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The spreadsheet library rejected the file.
    #[error("invalid workbook: {path} ({details})")]
    Open { path: PathBuf, details: String },

    /// The workbook contains no worksheets.
    #[error("workbook has no worksheets")]
    NoSheets,

    /// A sheet was requested by name but does not exist.
    #[error("sheet \"{name}\" not found (available: {available})")]
    SheetNotFound { name: String, available: String },
}

/// Result type for the kom library.
pub type Result<T> = std::result::Result<T, KomError>;
