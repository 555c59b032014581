//! Error types for the migration engine.

use sl_db::DbError;
use thiserror::Error;

/// Migration engine errors.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The database has tables but no readable version marker (S001).
    #[error("[S001] {0}")]
    Inconsistent(String),

    /// Requested version is not an upgrade target (S002).
    #[error("[S002] Schema version {version} is not a valid option")]
    InvalidTargetVersion { version: String },

    /// A statement inside a release's SQL batch file failed (S003).
    #[error("[S003] Database error in {file} line {line}: {source}")]
    Apply {
        file: String,
        line: usize,
        #[source]
        source: DbError,
    },

    /// A release directory disappeared between discovery and apply (S004).
    #[error("[S004] The directory {path} does not exist")]
    ReleaseNotFound { path: String },

    /// Database error outside batch execution (S005).
    #[error("[S005] Database error: {0}")]
    Db(#[from] DbError),

    /// Failed to read a batch file (S006).
    #[error("[S006] Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for [`SchemaError`].
pub type SchemaResult<T> = Result<T, SchemaError>;
