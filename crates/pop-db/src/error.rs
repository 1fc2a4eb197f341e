//! Error types for pop-db

use thiserror::Error;

/// Store and ingestion errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// CSV file could not be opened or is missing required columns (D003)
    #[error("[D003] CSV load failed: {0}")]
    CsvError(String),

    /// Mutex poisoned (D004)
    #[error("[D004] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// A CSV data row could not be decoded (D005)
    #[error("[D005] Malformed CSV row {row}: {message}")]
    MalformedRow { row: usize, message: String },
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::ExecutionError(err.to_string())
    }
}
