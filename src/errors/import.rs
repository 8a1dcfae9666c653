use thiserror::Error;

/// Errors raised by the bulk grant importer. Any of them aborts the whole import.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A data row could not be read or mapped
    #[error("Invalid row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Header or framing error in the file
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}
