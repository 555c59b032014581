//! Error types for sl-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Statement execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Query error (D003)
    #[error("[D003] Database query failed: {0}")]
    QueryError(String),

    /// Mutex poisoned (D004)
    #[error("[D004] Database mutex poisoned: {0}")]
    MutexPoisoned(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;
